use crate::trace::{TraceError, TraceResult};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

fn invalid_format(name: &'static str, value: &str) -> TraceError {
    TraceError::InvalidFormat {
        name,
        value: value.to_string(),
    }
}

fn short_buffer(name: &'static str, needed: usize, offset: usize, len: usize) -> TraceError {
    TraceError::InvalidLength {
        name,
        needed,
        offset,
        len,
    }
}

/// Checks that `hex` is exactly `width` chars of lowercase base16.
///
/// Uppercase digits, signs, and whitespace accepted by `from_str_radix` are
/// all rejected here, so the wire form stays canonical.
fn validate_base16(name: &'static str, hex: &str, width: usize) -> TraceResult<()> {
    let well_formed = hex.len() == width
        && hex
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if well_formed {
        Ok(())
    } else {
        Err(invalid_format(name, hex))
    }
}

/// Flags that can be set on a `SpanContext`.
///
/// The only assigned flag is [`TraceFlags::SAMPLED`]; the remaining bits
/// travel opaquely. Serialized as two lowercase hex characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Copy, Hash)]
pub struct TraceFlags(u8);

impl TraceFlags {
    /// Trace flags with the `sampled` flag set to `0`.
    ///
    /// Spans that are not sampled will be ignored by most tracing tools.
    pub const NOT_SAMPLED: TraceFlags = TraceFlags(0x00);

    /// Trace flags with the `sampled` flag set to `1`.
    pub const SAMPLED: TraceFlags = TraceFlags(0x01);

    /// Construct new trace flags
    pub const fn new(flags: u8) -> Self {
        TraceFlags(flags)
    }

    /// Parse flags from their two-character lowercase hex form.
    pub fn from_hex(hex: &str) -> TraceResult<Self> {
        validate_base16("trace flags", hex, 2)?;
        u8::from_str_radix(hex, 16)
            .map(TraceFlags)
            .map_err(|_| invalid_format("trace flags", hex))
    }

    /// Returns `true` if the `sampled` flag is set
    pub fn is_sampled(&self) -> bool {
        (*self & TraceFlags::SAMPLED) == TraceFlags::SAMPLED
    }

    /// Returns a copy of the current flags with the `sampled` flag set.
    pub fn with_sampled(&self, sampled: bool) -> Self {
        if sampled {
            *self | TraceFlags::SAMPLED
        } else {
            *self & !TraceFlags::SAMPLED
        }
    }

    /// Returns the flags as a `u8`
    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl BitAnd for TraceFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for TraceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Not for TraceFlags {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl fmt::LowerHex for TraceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// A 16-byte value which identifies a given trace.
///
/// The id is valid if it contains at least one non-zero byte. Stored as the
/// big-endian numeric value, so comparison order is the byte-wise order:
/// high 64 bits first, then the low 64 bits.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Copy, Hash)]
pub struct TraceId(u128);

impl TraceId {
    /// The width of a trace id in bytes.
    pub const SIZE: usize = 16;

    /// Invalid trace id, usable as a default or placeholder.
    pub const INVALID: TraceId = TraceId(0);

    /// Create a trace id from its representation as a byte array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        TraceId(u128::from_be_bytes(bytes))
    }

    /// Return the representation of this trace id as a byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Read a trace id from `src` beginning at `offset`.
    pub fn from_byte_slice(src: &[u8], offset: usize) -> TraceResult<Self> {
        let mut bytes = [0u8; 16];
        let tail = src
            .get(offset..)
            .and_then(|tail| tail.get(..Self::SIZE))
            .ok_or_else(|| short_buffer("trace id", Self::SIZE, offset, src.len()))?;
        bytes.copy_from_slice(tail);
        Ok(TraceId::from_bytes(bytes))
    }

    /// Write the bytes of this trace id into `dest` beginning at `offset`.
    pub fn copy_bytes_into(self, dest: &mut [u8], offset: usize) -> TraceResult<()> {
        let len = dest.len();
        let slot = dest
            .get_mut(offset..)
            .and_then(|tail| tail.get_mut(..Self::SIZE))
            .ok_or_else(|| short_buffer("trace id", Self::SIZE, offset, len))?;
        slot.copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Parse a trace id from its 32-character lowercase hex form.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracewire::TraceId;
    ///
    /// assert!(TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").is_ok());
    ///
    /// // exact width, lowercase only
    /// assert!(TraceId::from_hex("42").is_err());
    /// assert!(TraceId::from_hex("4BF92F3577B34DA6A3CE929D0E0E4736").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> TraceResult<Self> {
        validate_base16("trace id", hex, 2 * Self::SIZE)?;
        u128::from_str_radix(hex, 16)
            .map(TraceId)
            .map_err(|_| invalid_format("trace id", hex))
    }

    /// Returns `true` if at least one id byte is non-zero.
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The low 64 bits of the id, the portion probability samplers hash on.
    pub const fn random_part(self) -> u64 {
        self.0 as u64
    }
}

impl From<u128> for TraceId {
    fn from(value: u128) -> Self {
        TraceId(value)
    }
}

impl fmt::Debug for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:032x}", self.0))
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:032x}", self.0))
    }
}

impl fmt::LowerHex for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// An 8-byte value which identifies a given span.
///
/// The id is valid if it contains at least one non-zero byte.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Copy, Hash)]
pub struct SpanId(u64);

impl SpanId {
    /// The width of a span id in bytes.
    pub const SIZE: usize = 8;

    /// Invalid span id, usable as a default or placeholder.
    pub const INVALID: SpanId = SpanId(0);

    /// Create a span id from its representation as a byte array.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        SpanId(u64::from_be_bytes(bytes))
    }

    /// Return the representation of this span id as a byte array.
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Read a span id from `src` beginning at `offset`.
    pub fn from_byte_slice(src: &[u8], offset: usize) -> TraceResult<Self> {
        let mut bytes = [0u8; 8];
        let tail = src
            .get(offset..)
            .and_then(|tail| tail.get(..Self::SIZE))
            .ok_or_else(|| short_buffer("span id", Self::SIZE, offset, src.len()))?;
        bytes.copy_from_slice(tail);
        Ok(SpanId::from_bytes(bytes))
    }

    /// Write the bytes of this span id into `dest` beginning at `offset`.
    pub fn copy_bytes_into(self, dest: &mut [u8], offset: usize) -> TraceResult<()> {
        let len = dest.len();
        let slot = dest
            .get_mut(offset..)
            .and_then(|tail| tail.get_mut(..Self::SIZE))
            .ok_or_else(|| short_buffer("span id", Self::SIZE, offset, len))?;
        slot.copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Parse a span id from its 16-character lowercase hex form.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracewire::SpanId;
    ///
    /// assert!(SpanId::from_hex("00f067aa0ba902b7").is_ok());
    /// assert!(SpanId::from_hex("00f067aa0ba902").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> TraceResult<Self> {
        validate_base16("span id", hex, 2 * Self::SIZE)?;
        u64::from_str_radix(hex, 16)
            .map(SpanId)
            .map_err(|_| invalid_format("span id", hex))
    }

    /// Returns `true` if at least one id byte is non-zero.
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl From<u64> for SpanId {
    fn from(value: u64) -> Self {
        SpanId(value)
    }
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:016x}", self.0))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:016x}", self.0))
    }
}

impl fmt::LowerHex for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
