//! The bounded holding area for compressed object blobs.
//!
//! Objects enter an [`ObjectQueue`] in the order a later emit stage must
//! process them, wait there until the whole input set has been validated,
//! and leave either one at a time or in a single flush. The queue owns its
//! entries outright, payload bytes included, so nothing outlives removal.

use crate::{
    Result,
    error::{capacity_error, not_staged_error},
};
use std::collections::VecDeque;

/// Hard ceiling on any queue's capacity. Power-of-two sizes are good for
/// block based processing.
pub const STAGE_MAX_OBJECTS: usize = 1024;

/// Capacity used by [`ObjectQueue::new`].
pub const STAGE_DEFAULT_CAP: usize = 512;

const _: () = assert!(STAGE_MAX_OBJECTS.is_power_of_two());
const _: () = assert!(STAGE_DEFAULT_CAP <= STAGE_MAX_OBJECTS);

/// One not-yet-emitted compressed blob destined for the output
/// executable's injected section.
///
/// The compressed size is the payload's length; `real_size` records the
/// size after decompression. Decompression itself happens in a later
/// stage, not here.
#[derive(Debug)]
pub struct StagedObject {
    name: String,
    cdata: Box<[u8]>,
    real_size: usize,
}

impl StagedObject {
    /// Creates a staged object from its name, compressed payload, and
    /// decompressed size. Names are expected unique across one run.
    pub fn new(name: impl Into<String>, cdata: Vec<u8>, real_size: usize) -> Self {
        StagedObject {
            name: name.into(),
            cdata: cdata.into_boxed_slice(),
            real_size,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compressed payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.cdata
    }

    #[inline]
    pub fn compressed_size(&self) -> usize {
        self.cdata.len()
    }

    #[inline]
    pub fn real_size(&self) -> usize {
        self.real_size
    }
}

/// An ordered, capacity-bounded collection of [`StagedObject`]s.
///
/// Insertion order is significant: a drain hands entries back first-in
/// first-out. Construction is initialization; there is no uninitialized
/// or terminal state.
#[derive(Debug)]
pub struct ObjectQueue {
    objects: VecDeque<StagedObject>,
    cap: usize,
}

impl ObjectQueue {
    /// Creates a queue with the default capacity.
    pub fn new() -> Self {
        ObjectQueue {
            objects: VecDeque::new(),
            cap: STAGE_DEFAULT_CAP,
        }
    }

    /// Creates a queue bounded at `cap` entries.
    ///
    /// Fails when `cap` exceeds [`STAGE_MAX_OBJECTS`]; the maximum itself
    /// being a power of two is a compile-time invariant, not a check on
    /// `cap`.
    pub fn with_capacity(cap: usize) -> Result<Self> {
        if cap > STAGE_MAX_OBJECTS {
            return Err(capacity_error(format!(
                "capacity {cap} exceeds the {STAGE_MAX_OBJECTS}-entry maximum"
            )));
        }
        Ok(ObjectQueue {
            objects: VecDeque::new(),
            cap,
        })
    }

    /// Appends `obj` to the tail of the queue.
    ///
    /// Fails with a capacity error when the queue already holds its
    /// configured capacity; the queue is left unchanged in that case.
    pub fn push(&mut self, obj: StagedObject) -> Result<()> {
        if self.objects.len() + 1 > self.cap {
            return Err(capacity_error("object queue full"));
        }
        self.objects.push_back(obj);
        Ok(())
    }

    /// Unlinks and returns the entry named `name`.
    ///
    /// The relative order of the remaining entries is preserved. When no
    /// entry matches, the queue is left unchanged and the error is
    /// recoverable; callers typically warn and carry on.
    pub fn remove(&mut self, name: &str) -> Result<StagedObject> {
        let idx = self
            .objects
            .iter()
            .position(|obj| obj.name == name)
            .ok_or_else(|| not_staged_error(format!("'{name}' is not in the queue")))?;
        self.objects
            .remove(idx)
            .ok_or_else(|| not_staged_error(format!("'{name}' is not in the queue")))
    }

    /// Removes and releases every entry. The count is derived from the
    /// underlying sequence, so it is zero afterwards.
    pub fn flush(&mut self) {
        self.objects.clear();
    }

    /// Number of objects currently staged.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The configured capacity bound.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether an entry named `name` is staged.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.iter().any(|obj| obj.name == name)
    }

    /// Iterates the staged objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StagedObject> {
        self.objects.iter()
    }
}

impl Default for ObjectQueue {
    fn default() -> Self {
        Self::new()
    }
}
