use std::env;
use xssh::flags::Flags;
use xssh::shell::Shell;

fn main() {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("{}", e);
        flags.print_help();
        return;
    }

    if flags.is_set("help") {
        flags.print_help();
        return;
    }

    if flags.is_set("version") {
        println!("xssh {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // the shell is dropped before exiting so history and state are released
    let code = match Shell::new(flags).and_then(|mut shell| shell.run()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("xssh: {}", e);
            -1
        }
    };
    std::process::exit(code);
}
