use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::dsp::{FilterType, Waveform};

/// A small enum that fits in an atomic word.
pub trait Packed: Copy {
    fn pack(self) -> u32;
    fn unpack(raw: u32) -> Self;
}

impl Packed for Waveform {
    fn pack(self) -> u32 {
        Waveform::ALL.iter().position(|&w| w == self).unwrap_or(0) as u32
    }

    fn unpack(raw: u32) -> Self {
        Waveform::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or_default()
    }
}

impl Packed for FilterType {
    fn pack(self) -> u32 {
        FilterType::ALL.iter().position(|&t| t == self).unwrap_or(0) as u32
    }

    fn unpack(raw: u32) -> Self {
        FilterType::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or_default()
    }
}

/// A node setting that is not automated but may change while rendering
/// (oscillator waveform, filter type).
///
/// Clones share the same value: the control side holds one, the render side
/// the other.
pub struct Setting<T: Packed> {
    raw: Arc<AtomicU32>,
    _marker: PhantomData<T>,
}

impl<T: Packed> Setting<T> {
    pub fn new(value: T) -> Self {
        Self {
            raw: Arc::new(AtomicU32::new(value.pack())),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        T::unpack(self.raw.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: T) {
        self.raw.store(value.pack(), Ordering::Relaxed);
    }
}

impl<T: Packed> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            _marker: PhantomData,
        }
    }
}

impl<T: Packed + std::fmt::Debug> std::fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Setting").field(&self.get()).finish()
    }
}
