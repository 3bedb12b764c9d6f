//! Terminal front end for the wellness companion.
//!
//! Reads lines from stdin, prints replies, and speaks them when voice output
//! is configured. Slash commands control the session. Input is always typed;
//! `/voice` only turns spoken replies on.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use wellness_companion::adapters::crisis::WatchCrisisSurface;
use wellness_companion::application::{build_session, ChatSession, InputMode};
use wellness_companion::config::AppConfig;
use wellness_companion::domain::wellness::{choose_quote, CrisisResources, Message};

const HELP: &str = "Commands: /new  /text  /voice  /stop  /quote  /resources  /help  /quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.logging.init();
    config.validate().context("Invalid configuration")?;

    let crisis = Arc::new(WatchCrisisSurface::new());
    let alerts =
        crisis.spawn_alert_listener(|| println!("\n{}\n", CrisisResources.render_plain()));
    let mut session =
        build_session(&config, crisis.clone()).context("Failed to set up speech output")?;

    let provider = session.provider_info();
    info!(provider = %provider.name, model = %provider.model, "Wellness companion started");

    println!("{}", choose_quote(&mut rand::thread_rng()));
    println!("{HELP}\n");
    print_header(&session);
    session.start_new_session();
    print_last_reply(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/help" => println!("{HELP}"),
            "/new" => {
                session.start_new_session();
                print_header(&session);
                print_last_reply(&session);
            }
            "/text" => {
                session.set_input_mode(InputMode::Text);
                println!("(text mode)");
            }
            "/voice" => {
                session.set_input_mode(InputMode::Voice);
                println!("(voice mode: replies are spoken, keep typing to answer)");
            }
            "/stop" => session.stop_playback(),
            "/quote" => println!("{}", choose_quote(&mut rand::thread_rng())),
            "/resources" => println!("{}", CrisisResources.render_plain()),
            text => {
                let Some(outcome) = session.handle_user_turn(text).await? else {
                    continue;
                };
                println!("[{}]", session.phase_status_label());
                print_message(&outcome.message);
            }
        }
    }

    session.stop_playback();
    alerts.abort();
    info!(session_id = %session.id(), "Wellness companion stopped");
    Ok(())
}

fn print_header(session: &ChatSession) {
    println!("[{}]", session.phase_status_label());
}

fn print_last_reply(session: &ChatSession) {
    if let Some(message) = session.transcript().last() {
        print_message(message);
    }
}

fn print_message(message: &Message) {
    println!(
        "{} > {}\n",
        message.created_at().clock_label(),
        message.content()
    );
}
