//! UUIDv1 generator and related types.

use crate::Uuid;


pub mod with_rand08;

/// Offset between the UUID epoch (1582-10-15) and the Unix epoch in 100-nanosecond intervals.
const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

const MAX_TIMESTAMP: u64 = (1 << 60) - 1;
const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;
const MAX_NODE: u64 = (1 << 48) - 1;

/// The multicast bit of the first node octet, set on random node IDs so they never collide with
/// an IEEE 802 address (RFC 4122 Section 4.5).
const MULTICAST_BIT: u64 = 1 << 40;

/// A trait that defines the minimum random number generator interface for [`V1Generator`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`V1Generator`].
pub trait TimeSource {
    /// Returns the current time as the number of 100-nanosecond intervals elapsed since
    /// 1582-10-15 00:00:00 UTC.
    fn gregorian_ts(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn gregorian_ts(&mut self) -> u64 {
        use std::time;
        // a clock set before 1970 is pinned to the Unix epoch
        let since_unix = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default();
        GREGORIAN_OFFSET.wrapping_add((since_unix.as_nanos() / 100) as u64)
    }
}

/// Represents a UUIDv1 generator that owns the clock state (last timestamp, clock sequence, and
/// node identifier) and guarantees that no two UUIDs it produces are identical.
///
/// Whenever the timestamp passed is not greater than the previous one, that is, when two calls
/// land in the same 100-nanosecond tick or the system clock moves backwards, the 14-bit clock
/// sequence is incremented before the UUID is built. The node identifier is drawn from the random
/// number generator once, with the multicast bit set, because this library does not read hardware
/// addresses.
///
/// The generator is a plain value; wrap it in a lock to share it across threads, as the
/// process-wide generator behind [`uuid1`](crate::uuid1) does.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::V1Generator;
///
/// let mut g = V1Generator::with_rand08(rand::rngs::OsRng);
/// let (x, y) = (g.generate(), g.generate());
/// assert_ne!(x, y);
/// assert_eq!(x.version(), Some(1));
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R, T = StdSystemTime> {
    timestamp: u64,
    clock_seq: u16,
    node: u64,

    rand_source: R,
    time_source: T,
}

impl<R: RandSource, T: TimeSource> V1Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock,
    /// drawing a random clock sequence and a random node identifier from `rand_source`.
    pub fn with_rand_and_time_sources(mut rand_source: R, time_source: T) -> Self {
        let seed = rand_source.next_u64();
        Self {
            timestamp: 0,
            clock_seq: (seed >> 48) as u16 & MAX_CLOCK_SEQ,
            node: (seed & MAX_NODE) | MULTICAST_BIT,
            rand_source,
            time_source,
        }
    }

    /// Replaces the node identifier. Bits above the lower 48 are ignored.
    pub fn with_node(mut self, node: u64) -> Self {
        self.node = node & MAX_NODE;
        self
    }

    /// Returns the 48-bit node identifier embedded in every UUID this generator produces.
    pub const fn node(&self) -> u64 {
        self.node
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    pub fn generate(&mut self) -> Uuid {
        let timestamp = self.time_source.gregorian_ts();
        self.generate_core(timestamp)
    }

    /// Generates a new UUIDv1 object from the `timestamp` passed, counted in 100-nanosecond
    /// intervals since 1582-10-15. Bits above the lower 60 are ignored.
    ///
    /// The clock sequence is incremented, wrapping at 14 bits, unless `timestamp` is greater than
    /// the one used by the immediately preceding call; the pair is then stored for the next call.
    pub fn generate_core(&mut self, timestamp: u64) -> Uuid {
        let timestamp = timestamp & MAX_TIMESTAMP;
        if timestamp <= self.timestamp {
            if timestamp < self.timestamp {
                tracing::trace!(
                    previous = self.timestamp,
                    current = timestamp,
                    "clock moved backwards"
                );
            }
            self.clock_seq = self.clock_seq.wrapping_add(1) & MAX_CLOCK_SEQ;
        }
        self.timestamp = timestamp;

        Uuid::from_fields_v1(self.timestamp, self.clock_seq, self.node)
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rand_source.fill_bytes(&mut bytes);
        let mut uuid = Uuid::from(bytes);
        uuid.set_version(4);
        uuid.set_variant();
        uuid
    }
}

impl<R: RandSource + Default, T: TimeSource + Default> Default for V1Generator<R, T> {
    fn default() -> Self {
        Self::with_rand_and_time_sources(R::default(), T::default())
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::V1Generator;
///
/// V1Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V1Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V1Generator<R, T> {}
