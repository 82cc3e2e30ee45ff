// Autonomous probing agent
//
// Opens a line-oriented socket session against the configured target,
// lets the reasoning oracle pick each move, and grows a persisted
// knowledge base about the protocol. Runs until interrupted.

use anyhow::Result;
use colored::Color;

use sonde::agent::Agent;
use sonde::config::Config;
use sonde::console::Console;
use sonde::oracle::OpenAiOracle;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    if config.api_key.is_empty() {
        log::warn!("DEEPSEEK_API_KEY is not set; oracle calls will fail and retry forever");
    }

    let oracle = OpenAiOracle::from_config(&config);
    let console = Console::new(config.transcript_path.clone());
    let mut agent = Agent::new(config, oracle);

    tokio::select! {
        result = agent.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            console.line("system", "interrupted by operator, shutting down", Some(Color::BrightWhite));
        }
    }

    Ok(())
}
