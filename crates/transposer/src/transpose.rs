//! The note transposition transform.
//!
//! Pure functions over MIDI events. Note-on and note-off pitches move by a
//! signed number of semitones; every other event is copied unchanged. Sample
//! offsets, channels and velocities are never touched, and the output keeps
//! the input's order and length.
//!
//! Shifted note numbers are not clamped to 0-127. Only the wire encoder
//! ([`MidiEvent::to_raw`](transposer_core::MidiEvent::to_raw)) folds them
//! back into seven bits.

use transposer_core::{MidiBuffer, MidiEvent, MidiEventKind, NoteOff, NoteOn};

/// Shift a single event.
///
/// Pitch arithmetic saturates at the `i32` bounds, so any amount is safe.
#[inline]
pub fn transpose_event(event: &MidiEvent, semitones: i32) -> MidiEvent {
    match &event.event {
        MidiEventKind::NoteOn(note_on) => event.clone().with(MidiEventKind::NoteOn(NoteOn {
            note: note_on.note.saturating_add(semitones),
            ..*note_on
        })),
        MidiEventKind::NoteOff(note_off) => event.clone().with(MidiEventKind::NoteOff(NoteOff {
            note: note_off.note.saturating_add(semitones),
            ..*note_off
        })),
        MidiEventKind::Other(_) => event.clone(),
    }
}

/// Shift every event in `input`, appending the results to `output`.
///
/// This is the audio-thread entry point: `output` is preallocated, and the
/// only allocation possible is cloning a boxed long message.
pub fn transpose_into(input: &[MidiEvent], semitones: i32, output: &mut MidiBuffer) {
    for event in input {
        output.push(transpose_event(event, semitones));
    }
}

/// Shift a whole block into a new buffer.
pub fn transpose_block(input: &MidiBuffer, semitones: i32) -> MidiBuffer {
    let mut output = MidiBuffer::new();
    transpose_into(input.as_slice(), semitones, &mut output);
    output
}
