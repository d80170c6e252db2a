use std::path::PathBuf;

use client_common::{Controller, ModalConfig, RpcClient, form::Event};
use eyre::WrapErr;
use rustyline::{DefaultEditor, error::ReadlineError};
use structopt::StructOpt;
use tracing::{error, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;
use url::Url;

mod command;
mod render;

use command::Command;

const HISTORY_PATH: &str = "history.txt";

#[derive(StructOpt, Debug)]
#[structopt(name = "client-cli", about = "Drives the password change form from a terminal")]
struct Opt {
    /// toml file with validate_url, change_url and optionally session_cookie [default: config.toml]
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(long)]
    validate_url: Option<Url>,

    #[structopt(long)]
    change_url: Option<Url>,

    /// value of the Cookie header carrying the logged-in session
    #[structopt(long)]
    cookie: Option<String>,
}

fn setup_logger() -> eyre::Result<()> {

    let filter = EnvFilter::from_default_env()
        // Set the base level when not matched by other directives to WARN.
        .add_directive(LevelFilter::WARN.into())
        .add_directive("common=debug".parse()?)
        .add_directive("client_common=debug".parse()?)
        .add_directive("client_cli=trace".parse()?)
    ;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
    .with_max_level(tracing::Level::TRACE)
    .with_env_filter(filter)
    .finish();

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")?;

    Ok(())
}

/// Flags win over the file. The file is only read when a url is missing from the flags.
fn load_config(opt: &Opt) -> eyre::Result<ModalConfig> {
    let mut config = match (&opt.validate_url, &opt.change_url) {
        (Some(validate_url), Some(change_url)) => ModalConfig::new(validate_url.clone(), change_url.clone()),
        _ => {
            let path = opt.config.clone().unwrap_or_else(|| PathBuf::from(common::consts::CONFIG_PATH));
            let mut config = ModalConfig::load(&path)?;
            if let Some(u) = &opt.validate_url {
                config.validate_url = u.clone();
            }
            if let Some(u) = &opt.change_url {
                config.change_url = u.clone();
            }
            config
        }
    };
    if opt.cookie.is_some() {
        config.session_cookie = opt.cookie.clone();
    }
    Ok(config)
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    setup_logger()?;

    let opt = Opt::from_args();
    let config = load_config(&opt)?;

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let mut controller = Controller::new(RpcClient::new(&config));

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_PATH).is_err() {
        println!("No previous history.");
    }
    println!("type help for the list of commands");

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let command = command::parse(&line);
                // typed passwords stay out of the history file
                if !matches!(command, Ok(Command::Event(Event::Input(..)))) {
                    rl.add_history_entry(line.as_str())?;
                }
                match command {
                    Ok(Command::Event(event)) => {
                        let close_after = rt.block_on(controller.dispatch(event));
                        println!("{}", render::render(controller.state()));

                        if let Some(delay) = close_after {
                            rt.block_on(async {
                                tokio::time::sleep(delay).await;
                                controller.dispatch(Event::CloseAnimationDone).await
                            });
                            println!("{}", render::render(controller.state()));
                        }
                    }
                    Ok(Command::Show) => println!("{}", render::render(controller.state())),
                    Ok(Command::Help) => println!("{}", command::HELP),
                    Err(e) => error!("{}", e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        }
    }
    rl.save_history(HISTORY_PATH)?;
    Ok(())
}
