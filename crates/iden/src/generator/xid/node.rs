use sha2::{Digest, Sha256};

use crate::{Result, rand::RandSource};

/// Derives the 3-byte XID machine ID from a host name: the first three bytes
/// of its SHA-256 digest.
///
/// # Example
/// ```
/// use iden::generator::machine_id_from_hostname;
///
/// assert_eq!(machine_id_from_hostname(b"localhost"), [0x49, 0x96, 0x0d]);
/// ```
#[must_use]
pub fn machine_id_from_hostname(hostname: &[u8]) -> [u8; 3] {
    let digest = Sha256::digest(hostname);
    [digest[0], digest[1], digest[2]]
}

/// Returns the machine ID for this host.
///
/// Falls back to three random bytes when the host name cannot be read.
///
/// # Errors
///
/// Returns [`Error::EntropySource`](crate::Error::EntropySource) if the
/// fallback draw fails.
pub fn host_machine_id<R>(rng: &R) -> Result<[u8; 3]>
where
    R: RandSource<u32>,
{
    match hostname::get() {
        Ok(name) => Ok(machine_id_from_hostname(name.as_encoded_bytes())),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "host name unavailable, using a random machine id");
            #[cfg(not(feature = "tracing"))]
            let _ = e;
            let bits: u32 = rng.rand()?;
            let [_, a, b, c] = bits.to_be_bytes();
            Ok([a, b, c])
        }
    }
}

/// Returns the 2-byte process ID: the OS process ID modulo 65536,
/// big-endian.
#[must_use]
pub fn host_process_id() -> [u8; 2] {
    let pid = std::process::id() % 65_536;
    [(pid >> 8) as u8, pid as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::mock::FailingRand;

    #[test]
    fn machine_id_is_digest_prefix() {
        let digest = Sha256::digest(b"build-host-01");
        assert_eq!(
            machine_id_from_hostname(b"build-host-01"),
            [digest[0], digest[1], digest[2]]
        );
        assert_ne!(
            machine_id_from_hostname(b"build-host-01"),
            machine_id_from_hostname(b"build-host-02")
        );
    }

    #[test]
    fn host_machine_id_hashes_the_host_name() {
        // with a readable host name the RNG is never consulted
        if let Ok(name) = hostname::get() {
            let expected = machine_id_from_hostname(name.as_encoded_bytes());
            assert_eq!(host_machine_id(&FailingRand).unwrap(), expected);
            assert_eq!(host_machine_id(&FailingRand).unwrap(), expected);
        }
    }

    #[test]
    fn process_id_is_pid_modulo_65536() {
        let pid = std::process::id() % 65_536;
        assert_eq!(u32::from(u16::from_be_bytes(host_process_id())), pid);
    }
}
