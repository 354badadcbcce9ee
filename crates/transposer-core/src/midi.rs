//! MIDI event types for sample-accurate MIDI processing.
//!
//! The event model is deliberately small: note-on and note-off are decoded
//! into typed structs, everything else is carried as an opaque
//! [`RawMessage`] and forwarded byte-for-byte.
//!
//! Note numbers are stored as [`MidiNote`] (`i32`) rather than `u8`. Plugins
//! may shift them outside the 0-127 wire range and the framework keeps the
//! value as-is; only [`MidiEvent::to_raw`] folds it back into seven bits.

use crate::error::MidiError;

// =============================================================================
// Buffer Size Constants
// =============================================================================

/// Maximum size of a long (SysEx or other multi-byte) message in bytes.
///
/// Configurable via Cargo features:
/// - `sysex-256`: 256 bytes
/// - default: 512 bytes
/// - `sysex-1024`: 1024 bytes
/// - `sysex-2048`: 2048 bytes
#[cfg(feature = "sysex-2048")]
pub const MAX_LONG_MESSAGE_SIZE: usize = 2048;

#[cfg(all(feature = "sysex-1024", not(feature = "sysex-2048")))]
pub const MAX_LONG_MESSAGE_SIZE: usize = 1024;

#[cfg(all(
    feature = "sysex-256",
    not(any(feature = "sysex-1024", feature = "sysex-2048"))
))]
pub const MAX_LONG_MESSAGE_SIZE: usize = 256;

#[cfg(not(any(feature = "sysex-256", feature = "sysex-1024", feature = "sysex-2048")))]
pub const MAX_LONG_MESSAGE_SIZE: usize = 512;

/// Maximum number of MIDI events per buffer.
pub const MAX_MIDI_EVENTS: usize = 1024;

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const STATUS_SYSEX: u8 = 0xF0;

// =============================================================================
// Basic MIDI Types
// =============================================================================

/// MIDI channel (1-16).
pub type MidiChannel = u8;

/// MIDI note number. Nominally 0-127 (60 = middle C), not enforced.
pub type MidiNote = i32;

/// Note velocity. Nominally 0-127.
pub type Velocity = u8;

/// A MIDI note-on event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOn {
    /// MIDI channel (1-16).
    pub channel: MidiChannel,
    /// Note number.
    pub note: MidiNote,
    /// Velocity.
    pub velocity: Velocity,
}

/// A MIDI note-off event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOff {
    /// MIDI channel (1-16).
    pub channel: MidiChannel,
    /// Note number.
    pub note: MidiNote,
    /// Release velocity.
    pub velocity: Velocity,
}

// =============================================================================
// Raw Messages
// =============================================================================

/// A channel or system message of one to three bytes, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortMessage {
    bytes: [u8; 3],
    len: u8,
}

impl ShortMessage {
    /// Wrap up to three bytes. Returns `None` for empty or longer input.
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 3 {
            return None;
        }
        let mut data = [0u8; 3];
        data[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            bytes: data,
            len: bytes.len() as u8,
        })
    }

    /// The message bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// A message longer than three bytes (normally SysEx), stored in a fixed
/// buffer so copying it never reallocates.
#[derive(Clone)]
pub struct LongMessage {
    data: [u8; MAX_LONG_MESSAGE_SIZE],
    len: usize,
}

impl LongMessage {
    /// Copy `bytes` into a new long message.
    pub fn new(bytes: &[u8]) -> Result<Self, MidiError> {
        if bytes.len() > MAX_LONG_MESSAGE_SIZE {
            return Err(MidiError::MessageTooLong {
                len: bytes.len(),
                max: MAX_LONG_MESSAGE_SIZE,
            });
        }
        let mut data = [0u8; MAX_LONG_MESSAGE_SIZE];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            data,
            len: bytes.len(),
        })
    }

    /// The message bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Whether this is a System Exclusive message.
    pub fn is_sysex(&self) -> bool {
        self.as_slice().first() == Some(&STATUS_SYSEX)
    }
}

impl core::fmt::Debug for LongMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LongMessage")
            .field("len", &self.len)
            .field("data", &self.as_slice())
            .finish()
    }
}

impl PartialEq for LongMessage {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for LongMessage {}

/// Opaque payload of an event the framework does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMessage {
    /// Up to three bytes, inline.
    Short(ShortMessage),
    /// Longer messages. Boxed to keep [`MidiEventKind`] small.
    Long(Box<LongMessage>),
}

impl RawMessage {
    /// Build a raw message from bytes, choosing the inline form when possible.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MidiError> {
        if bytes.is_empty() {
            return Err(MidiError::Empty);
        }
        match ShortMessage::new(bytes) {
            Some(short) => Ok(RawMessage::Short(short)),
            None => Ok(RawMessage::Long(Box::new(LongMessage::new(bytes)?))),
        }
    }

    /// The message bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RawMessage::Short(short) => short.as_slice(),
            RawMessage::Long(long) => long.as_slice(),
        }
    }
}

// =============================================================================
// MIDI Event
// =============================================================================

/// MIDI event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiEventKind {
    /// Note on event.
    NoteOn(NoteOn),
    /// Note off event.
    NoteOff(NoteOff),
    /// Any other message, forwarded verbatim.
    Other(RawMessage),
}

/// A sample-accurate MIDI event.
///
/// The `sample_offset` field specifies when within the current block this
/// event happens. Blocks are not required to be sorted by offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiEvent {
    /// Sample offset within the current block (0 = start of block).
    pub sample_offset: u32,
    /// The MIDI event data.
    pub event: MidiEventKind,
}

impl Default for MidiEvent {
    /// A note-off on channel 1 with everything else zeroed. Used for buffer
    /// initialization; does not allocate.
    fn default() -> Self {
        Self::note_off(0, 1, 0, 0)
    }
}

impl MidiEvent {
    /// Create a note-on event.
    pub const fn note_on(
        sample_offset: u32,
        channel: MidiChannel,
        note: MidiNote,
        velocity: Velocity,
    ) -> Self {
        Self {
            sample_offset,
            event: MidiEventKind::NoteOn(NoteOn {
                channel,
                note,
                velocity,
            }),
        }
    }

    /// Create a note-off event.
    pub const fn note_off(
        sample_offset: u32,
        channel: MidiChannel,
        note: MidiNote,
        velocity: Velocity,
    ) -> Self {
        Self {
            sample_offset,
            event: MidiEventKind::NoteOff(NoteOff {
                channel,
                note,
                velocity,
            }),
        }
    }

    /// Create an opaque event.
    pub const fn other(sample_offset: u32, message: RawMessage) -> Self {
        Self {
            sample_offset,
            event: MidiEventKind::Other(message),
        }
    }

    /// Replace the event data, keeping the sample offset.
    ///
    /// ```ignore
    /// MidiEventKind::NoteOn(note_on) => {
    ///     output.push(event.clone().with(MidiEventKind::NoteOn(NoteOn {
    ///         note: note_on.note + 12,
    ///         ..*note_on
    ///     })));
    /// }
    /// ```
    pub fn with(self, kind: MidiEventKind) -> Self {
        MidiEvent {
            sample_offset: self.sample_offset,
            event: kind,
        }
    }

    /// Whether this is a note-on or note-off.
    pub fn is_note(&self) -> bool {
        matches!(
            self.event,
            MidiEventKind::NoteOn(_) | MidiEventKind::NoteOff(_)
        )
    }

    /// Classify raw MIDI bytes.
    ///
    /// - `9n kk vv` with `vv > 0` is a note-on on channel `n + 1`.
    /// - `9n kk 00` is a note-off with velocity 0.
    /// - `8n kk vv` is a note-off.
    /// - Everything else, including truncated note messages, is kept as
    ///   [`MidiEventKind::Other`].
    pub fn from_bytes(sample_offset: u32, bytes: &[u8]) -> Result<Self, MidiError> {
        let (&status, data) = bytes.split_first().ok_or(MidiError::Empty)?;
        let channel = (status & 0x0F) + 1;

        let event = match (status & 0xF0, data) {
            (STATUS_NOTE_ON, &[note, velocity, ..]) if velocity > 0 => {
                Self::note_on(sample_offset, channel, MidiNote::from(note), velocity)
            }
            (STATUS_NOTE_ON | STATUS_NOTE_OFF, &[note, velocity, ..]) => {
                Self::note_off(sample_offset, channel, MidiNote::from(note), velocity)
            }
            _ => Self::other(sample_offset, RawMessage::from_bytes(bytes)?),
        };
        Ok(event)
    }

    /// Encode back to wire bytes.
    ///
    /// Note events fold the note number and velocity into seven bits and
    /// the channel into 1-16, since the wire format cannot carry anything
    /// else. Opaque events are returned unchanged (cloning a long message
    /// allocates).
    pub fn to_raw(&self) -> RawMessage {
        let encode = |status: u8, channel: MidiChannel, note: MidiNote, velocity: Velocity| {
            let channel = channel.clamp(1, 16) - 1;
            ShortMessage {
                bytes: [status | channel, (note & 0x7F) as u8, velocity & 0x7F],
                len: 3,
            }
        };

        match &self.event {
            MidiEventKind::NoteOn(on) => {
                RawMessage::Short(encode(STATUS_NOTE_ON, on.channel, on.note, on.velocity))
            }
            MidiEventKind::NoteOff(off) => {
                RawMessage::Short(encode(STATUS_NOTE_OFF, off.channel, off.note, off.velocity))
            }
            MidiEventKind::Other(raw) => raw.clone(),
        }
    }
}

// =============================================================================
// MIDI Buffer
// =============================================================================

/// A fixed-capacity buffer of MIDI events for one processing block.
///
/// Storage is allocated once in [`MidiBuffer::new`]; pushing never grows it.
/// Two buffers can be exchanged with [`std::mem::swap`] without copying
/// events, which is how the host hands processed output back.
#[derive(Clone)]
pub struct MidiBuffer {
    events: Box<[MidiEvent]>,
    len: usize,
    /// Set to true when a push fails due to buffer exhaustion
    overflowed: bool,
}

impl MidiBuffer {
    /// Create a new empty MIDI buffer with [`MAX_MIDI_EVENTS`] slots.
    pub fn new() -> Self {
        Self {
            events: std::iter::repeat_with(MidiEvent::default)
                .take(MAX_MIDI_EVENTS)
                .collect(),
            len: 0,
            overflowed: false,
        }
    }

    /// Clear all events from the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Returns the number of events in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of events the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    /// Returns true if any push failed since the last clear.
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Push an event to the buffer.
    ///
    /// Returns `true` if the event was added, `false` if the buffer is full.
    /// Sets the overflow flag when the buffer is exhausted.
    #[inline]
    pub fn push(&mut self, event: MidiEvent) -> bool {
        if self.len < self.events.len() {
            self.events[self.len] = event;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }

    /// Iterate over events in the buffer.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MidiEvent> {
        self.events[..self.len].iter()
    }

    /// Get the events as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[MidiEvent] {
        &self.events[..self.len]
    }
}

impl Default for MidiBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MidiBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MidiBuffer")
            .field("events", &self.as_slice())
            .field("overflowed", &self.overflowed)
            .finish()
    }
}

impl PartialEq for MidiBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl FromIterator<MidiEvent> for MidiBuffer {
    /// Collect events; anything past capacity is dropped and flagged.
    fn from_iter<I: IntoIterator<Item = MidiEvent>>(iter: I) -> Self {
        let mut buffer = Self::new();
        for event in iter {
            buffer.push(event);
        }
        buffer
    }
}

impl<'a> IntoIterator for &'a MidiBuffer {
    type Item = &'a MidiEvent;
    type IntoIter = std::slice::Iter<'a, MidiEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
