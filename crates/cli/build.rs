use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("proofread")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Proofread Contributors")
        .about("Check grammar of blogc source files using LanguageTool API")
        .arg(clap::arg!([SOURCE] "blogc source file").required_unless_present("completions"))
        .arg(clap::arg!(-a --"api-url" <URL> "LanguageTool API URL"))
        .arg(
            clap::arg!(--config <FILE> "Settings file (default: ~/.proofread.yaml)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-c --"disable-categories" <IDS> "Comma-separated grammar checking categories to disable")
                .value_delimiter(','),
        )
        .arg(clap::arg!(-r --"disable-rules" <IDS> "Comma-separated grammar checking rules to disable").value_delimiter(','))
        .arg(
            clap::arg!(-i --"ignore-words" <WORDS> "Comma-separated words to ignore when checking grammar")
                .value_delimiter(','),
        )
        .arg(clap::arg!(-d --"dump-html" "Dump HTML generated by blogc and exit"))
        .arg(clap::arg!(-t --"dump-text" "Dump text generated and exit"))
        .arg(clap::arg!(-l --language <LANG> "Source language (default: en-US)"))
        .arg(clap::arg!(--"log-level" <LEVEL> "Log level (default: warn)"))
        .arg(clap::arg!(-m --"mother-tongue" <LANG> "Mother tongue of the author"))
        .arg(
            clap::arg!(--blogc <PATH> "Path to the blogc binary (default: blogc)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--timeout <SECS> "HTTP timeout in seconds")
                .default_value("30")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Report format (text, json)")
                .default_value("text")
                .value_parser(["text", "txt", "json"])
                .ignore_case(true),
        )
        .arg(clap::arg!(-v --verbose "Print progress to stderr"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "proofread", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "proofread", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "proofread", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "proofread", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Elvish, &mut cmd, "proofread", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
