use std::fmt;
use std::fs;
use std::io;
use std::net::{Ipv4Addr, UdpSocket};

pub const DEFAULT_PORT: u16 = 8000;

/// Destination of the datagram. The host stays a string until send time,
/// when the socket layer resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Parse "host" or "host:port"; a missing port means DEFAULT_PORT.
    /// The host part is a hostname or IPv4 literal; bare IPv6 literals
    /// would be split at their last colon.
    pub fn parse(spec: &str) -> io::Result<Self> {
        match spec.rfind(':') {
            Some(i) => {
                let port = spec[i + 1..].parse::<u16>().map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("bad port in {:?}: {}", spec, e),
                    )
                })?;
                Ok(Target { host: spec[..i].to_string(), port })
            }
            None => Ok(Target { host: spec.to_string(), port: DEFAULT_PORT }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A payload argument starting with '@' names a file to read instead.
pub fn read_payload(arg: &str) -> io::Result<String> {
    match arg.strip_prefix('@') {
        Some(fname) => Ok(fs::read_to_string(fname)?.trim().to_string()),
        None => Ok(arg.to_string()),
    }
}

/// Resolve the target, send the UTF-8 bytes of msg in a single datagram,
/// and drop the socket. Returns the byte count the kernel accepted.
pub fn send_message(target: &Target, msg: &str) -> io::Result<usize> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((target.host.as_str(), target.port))?;
    socket.send(msg.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parse_plain_host_gets_default_port() {
        let t = Target::parse("localhost").unwrap();
        assert_eq!(t, Target { host: "localhost".to_string(), port: DEFAULT_PORT });
    }

    #[test]
    fn parse_keeps_explicit_port() {
        let t = Target::parse("10.0.0.14:9999").unwrap();
        assert_eq!(t.host, "10.0.0.14");
        assert_eq!(t.port, 9999);
        assert_eq!(t.to_string(), "10.0.0.14:9999");
    }

    #[test]
    fn parse_rejects_junk_port() {
        assert!(Target::parse("localhost:supz").is_err());
    }

    #[test]
    fn payload_literal_passes_through() {
        assert_eq!(read_payload("something").unwrap(), "something");
    }

    #[test]
    fn payload_from_file() {
        let path = std::env::temp_dir().join(format!("sendgram-test-{}", std::process::id()));
        fs::write(&path, "from a file\n").unwrap();
        let arg = format!("@{}", path.display());
        assert_eq!(read_payload(&arg).unwrap(), "from a file");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn payload_file_missing_is_an_error() {
        assert!(read_payload("@/no/such/file/anywhere").is_err());
    }

    #[test]
    fn one_datagram_with_the_exact_bytes() -> io::Result<()> {
        let receiver = UdpSocket::bind("127.0.0.1:0")?;
        receiver.set_read_timeout(Some(Duration::from_secs(5)))?;
        let target = Target {
            host: "127.0.0.1".to_string(),
            port: receiver.local_addr()?.port(),
        };

        let sent = send_message(&target, "something")?;
        assert_eq!(sent, "something".len());

        let mut buf = [0; 256];
        let (amt, _src) = receiver.recv_from(&mut buf)?;
        assert_eq!(&buf[..amt], b"something");
        Ok(())
    }
}
