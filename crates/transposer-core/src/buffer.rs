//! Audio buffer view handed to [`AudioProcessor::process`](crate::AudioProcessor::process).
//!
//! MIDI effects declare no audio buses, so in practice the buffer has zero
//! channels. It still carries the block length, and processors are expected
//! to leave any outputs they were given silent.

/// Borrowed input and output channels for one processing block.
pub struct AudioBuffer<'a> {
    inputs: &'a [&'a [f32]],
    outputs: &'a mut [&'a mut [f32]],
    num_samples: usize,
}

impl<'a> AudioBuffer<'a> {
    /// Create a new audio buffer.
    ///
    /// Every channel slice must hold at least `num_samples` samples.
    pub fn new(
        inputs: &'a [&'a [f32]],
        outputs: &'a mut [&'a mut [f32]],
        num_samples: usize,
    ) -> Self {
        Self {
            inputs,
            outputs,
            num_samples,
        }
    }

    /// Get the number of samples in this block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Get the number of input channels.
    #[inline]
    pub fn num_input_channels(&self) -> usize {
        self.inputs.len()
    }

    /// Get the number of output channels.
    #[inline]
    pub fn num_output_channels(&self) -> usize {
        self.outputs.len()
    }

    /// Get an input channel's samples.
    ///
    /// Returns an empty slice if the channel doesn't exist.
    #[inline]
    pub fn input(&self, channel: usize) -> &[f32] {
        self.inputs
            .get(channel)
            .map(|c| &c[..self.num_samples])
            .unwrap_or(&[])
    }

    /// Clear all output channels to silence.
    pub fn clear_outputs(&mut self) {
        for output in self.outputs.iter_mut() {
            output[..self.num_samples].fill(0.0);
        }
    }
}

impl AudioBuffer<'static> {
    /// A buffer with no channels, for MIDI-only processing.
    pub fn empty(num_samples: usize) -> Self {
        Self::new(&[], &mut [], num_samples)
    }
}
