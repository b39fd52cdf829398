// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: mirror host
fn mirror_arg() -> Arg {
    Arg::new("mirror")
        .long("mirror")
        .value_name("URL")
        .global(true)
        .help("Mirror host to use instead of download.qt.io")
}

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .global(true)
        .help("Path to a TOML configuration file")
}

fn build_cli() -> Command {
    Command::new("qtrepo")
        .version(env!("CARGO_PKG_VERSION"))
        .author("qtrepo Contributors")
        .about("Resolve Qt SDK repository packages into archive URLs")
        .subcommand_required(true)
        .arg(mirror_arg())
        .arg(config_arg())
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the resolved archives as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(
            Command::new("archives")
                .about("Resolve the archives of a Qt release and its modules")
                .arg(Arg::new("os_name").required(true).help("Host OS: windows, linux or mac"))
                .arg(Arg::new("target").required(true).help("Target platform: desktop, android, ios or winrt"))
                .arg(Arg::new("version").required(true).help("Qt version, e.g. 5.13.1"))
                .arg(Arg::new("arch").required(true).help("Architecture, e.g. gcc_64 or wasm_32"))
                .arg(
                    Arg::new("module")
                        .short('m')
                        .long("module")
                        .action(ArgAction::Append)
                        .help("Additional module, may be repeated"),
                ),
        )
        .subcommand(
            Command::new("tool")
                .about("Resolve the archives of a tool at an exact version")
                .arg(Arg::new("os_name").required(true).help("Host OS: windows, linux or mac"))
                .arg(Arg::new("tool_name").required(true).help("Tool directory, e.g. tools_mingw"))
                .arg(Arg::new("version").required(true).help("Exact tool version, e.g. 4.9.1-3"))
                .arg(Arg::new("arch").required(true).help("Tool variant, e.g. win32_mingw491"))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .default_value("desktop")
                        .help("Target platform"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    if let Err(e) = fs::write(man_dir.join("qtrepo.1"), buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
