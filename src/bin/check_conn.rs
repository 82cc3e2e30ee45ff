// Connectivity smoke test against the target server
//
// Runs a fixed login-and-look script through the text channel and
// prints every exchange. Useful to verify a target is reachable before
// burning oracle calls on it.

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;

use sonde::channel::{ReceiveOutcome, TextChannel, sanitize};
use sonde::config::Config;

const SCRIPT: &[&str] = &["start_test", "123456", "look", "quit"];

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let mut channel = TextChannel::new(config.target_addr.as_str(), config.connect_timeout);

    println!("[*] connecting to {}...", config.target_addr);
    channel.connect().await?;
    println!("[*] connected");

    println!("[*] waiting for the server banner...");
    match channel.receive(config.receive_timeout).await? {
        ReceiveOutcome::Data(raw) => println!("[server]:\n{}", sanitize(&raw)),
        ReceiveOutcome::Timeout => println!("[!] banner receive timed out"),
        ReceiveOutcome::Closed => {
            println!("[!] server closed the connection");
            return Ok(());
        }
    }

    for (step, payload) in SCRIPT.iter().enumerate() {
        println!("\n[*] [step {}] sending: {payload}", step + 1);
        channel.send(payload).await?;

        // Give the server a moment before reading the reply.
        sleep(Duration::from_secs(1)).await;
        match channel.receive(config.receive_timeout).await? {
            ReceiveOutcome::Data(raw) => println!("[server]: {}", sanitize(&raw)),
            ReceiveOutcome::Timeout => println!("[!] reply timed out"),
            ReceiveOutcome::Closed => {
                println!("[!] server closed the connection");
                break;
            }
        }
    }

    channel.disconnect();
    println!("[*] connection closed");
    Ok(())
}
