//! Connection driver.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::codec::Framed;
use tracing::{debug, info, trace, warn};

use crate::config::SessionConfig;
use crate::state::{RawSender, Session};

use super::codec::LineCodec;

/// Create the channel carrying outbound lines from a session to a
/// [`Connection`].
pub fn outbound_channel() -> (Arc<dyn RawSender>, UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    (Arc::new(tx), rx)
}

/// Text the user typed, with the channel or peer it was typed into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    pub text: String,
    pub target: Option<String>,
}

impl Intent {
    pub fn new(text: impl Into<String>, target: Option<&str>) -> Self {
        Self {
            text: text.into(),
            target: target.map(str::to_owned),
        }
    }
}

/// Create the channel carrying user intents into a running [`Connection`],
/// where they go through [`Session::submit`].
pub fn intent_channel() -> (UnboundedSender<Intent>, UnboundedReceiver<Intent>) {
    mpsc::unbounded_channel()
}

/// A framed TCP connection to one IRC server.
pub struct Connection {
    framed: Framed<TcpStream, LineCodec>,
    registration: Vec<String>,
}

impl Connection {
    /// Connect to the configured server.
    pub async fn connect(config: &SessionConfig) -> Result<Self> {
        let address = config.address();
        let stream = TcpStream::connect(&address)
            .await
            .with_context(|| format!("connecting to {}", address))?;
        info!(%address, "connected");
        Ok(Self::from_stream(stream, config))
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream, config: &SessionConfig) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self {
            framed: Framed::new(stream, LineCodec::with_max_len(config.max_line_len)),
            registration: config.registration_lines(),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> Result<()> {
        use socket2::{SockRef, TcpKeepalive};

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }

    /// Register, then pump lines until the server closes the connection.
    ///
    /// Inbound lines go to [`Session::feed_line`] in arrival order. Intents
    /// received on `intents` are passed to [`Session::submit`]; a rejected
    /// intent is logged and the connection keeps running. Lines queued on
    /// `outbound` (PONGs and built intents) are written as they arrive.
    pub async fn run(
        self,
        session: &mut Session,
        mut outbound: UnboundedReceiver<String>,
        mut intents: UnboundedReceiver<Intent>,
    ) -> Result<()> {
        let (mut sink, mut stream) = self.framed.split();

        for line in self.registration {
            trace!(%line, ">>");
            sink.send(line).await.context("sending registration")?;
        }

        loop {
            tokio::select! {
                inbound = stream.next() => match inbound {
                    Some(Ok(line)) => {
                        trace!(%line, "<<");
                        session.feed_line(&line);
                    }
                    Some(Err(e)) => return Err(e).context("reading from server"),
                    None => {
                        debug!("server closed the connection");
                        return Ok(());
                    }
                },
                Some(intent) = intents.recv() => {
                    if let Err(e) = session.submit(&intent.text, intent.target.as_deref()) {
                        warn!(text = %intent.text, "rejected intent: {}", e);
                    }
                }
                queued = outbound.recv() => match queued {
                    Some(line) => {
                        trace!(%line, ">>");
                        sink.send(line).await.context("writing to server")?;
                    }
                    None => {
                        debug!("outbound channel closed");
                        return Ok(());
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_run_registers_answers_ping_and_submits_intents() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let (read, mut write) = socket.into_split();
            let mut lines = BufReader::new(read).lines();

            let nick = lines.next_line().await.unwrap().unwrap();
            let user = lines.next_line().await.unwrap().unwrap();
            write
                .write_all(b":srv 001 bob :Welcome\r\nPING :xyz\r\n")
                .await
                .unwrap();
            let mut rest = vec![
                lines.next_line().await.unwrap().unwrap(),
                lines.next_line().await.unwrap().unwrap(),
            ];
            rest.sort();
            (nick, user, rest)
        });

        let config = SessionConfig::new("127.0.0.1", "bob").with_port(port);
        let (sender, outbound) = outbound_channel();
        let mut session = Session::with_sender(config.clone(), sender);
        let (intent_tx, intents) = intent_channel();
        intent_tx.send(Intent::new("/join #x", None)).unwrap();
        intent_tx.send(Intent::new("hello", None)).unwrap();

        let connection = Connection::connect(&config).await.unwrap();
        connection.run(&mut session, outbound, intents).await.unwrap();

        let (nick, user, rest) = server.await.unwrap();
        assert_eq!(nick, "NICK bob");
        assert_eq!(user, "USER bob 0 * :bob");
        assert_eq!(rest, vec!["JOIN #x", "PONG :xyz"]);
        assert!(session.is_connected());
    }
}
