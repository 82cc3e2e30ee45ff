// Reference target server for agent development
//
// A minimal MUD-style line protocol: ID prompt, password prompt, then
// a tiny game shell with help/look/go/quit. One task per connection.

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const LISTEN_ADDR: &str = "127.0.0.1:4000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginState {
    AwaitingId,
    AwaitingPassword,
    InGame,
}

async fn handle_client(mut stream: TcpStream, peer: std::net::SocketAddr) -> Result<()> {
    log::info!("new connection from {peer}");
    stream
        .write_all("Welcome to AlphaMUD. Enter your ID:\n".as_bytes())
        .await?;

    let mut state = LoginState::AwaitingId;
    let mut buf = vec![0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf[..n]).trim().to_string();
        log::info!("received from {peer}: {text}");

        let reply = match state {
            LoginState::AwaitingId => {
                state = LoginState::AwaitingPassword;
                "ID accepted. Enter your password:\n".to_string()
            }
            LoginState::AwaitingPassword => {
                if text.is_empty() {
                    "The password cannot be empty.\n".to_string()
                } else {
                    state = LoginState::InGame;
                    "Welcome to this world! HP:100/100 >".to_string()
                }
            }
            LoginState::InGame => match text.as_str() {
                "help" => "Commands: look, go, help, quit\nHP:100/100 >".to_string(),
                "look" => {
                    "You see a dark room. There is a door to the north.\nHP:100/100 >".to_string()
                }
                "quit" => {
                    stream.write_all("Goodbye.\n".as_bytes()).await?;
                    break;
                }
                other if other.starts_with("go ") => {
                    format!("You head {}. It is dangerous there.\nHP:90/100 >", &other[3..])
                }
                other => format!("Unknown command: {other}\nHP:100/100 >"),
            },
        };
        stream.write_all(reply.as_bytes()).await?;
    }

    log::info!("connection closed {peer}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    log::info!("listening on {LISTEN_ADDR}");

    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, peer).await {
                log::warn!("client {peer} error: {e}");
            }
        });
    }
}
