//! Format buffer
//!
//! A single reusable text buffer per logger. It grows on demand and never
//! shrinks, so a logger that settles on a maximum message length stops
//! allocating. An allocation failure leaves the buffer empty (capacity zero)
//! rather than keeping a stale, undersized allocation.
//!
//! The logger keeps this behind its buffer spin lock; nothing here is
//! synchronized on its own.

use crate::error::DispatchError;
use std::fmt;

#[derive(Debug, Default)]
pub(crate) struct FormatBuffer {
    text: String,
    /// Usable size in bytes; the allocation may be larger
    capacity: usize,
    /// Requests above this are treated as allocation failure
    limit: Option<usize>,
}

impl FormatBuffer {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            text: String::new(),
            capacity: 0,
            limit,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    /// Make room for at least `required` bytes and hand out a writer bounded
    /// by the current capacity
    pub(crate) fn acquire(&mut self, required: usize) -> Result<BoundedWriter<'_>, DispatchError> {
        if required > self.capacity {
            // Release first: the old allocation is never reused once too small.
            self.text = String::new();
            self.capacity = 0;

            if self.limit.is_some_and(|limit| required > limit) {
                return Err(DispatchError::Alloc {
                    requested: required,
                });
            }

            let mut grown = String::new();
            grown
                .try_reserve_exact(required)
                .map_err(|_| DispatchError::Alloc {
                    requested: required,
                })?;
            self.text = grown;
            self.capacity = required;
        }

        self.text.clear();
        Ok(BoundedWriter {
            text: &mut self.text,
            limit: self.capacity,
        })
    }
}

/// `fmt::Write` into the shared buffer that refuses to reallocate
pub(crate) struct BoundedWriter<'a> {
    text: &'a mut String,
    limit: usize,
}

impl BoundedWriter<'_> {
    /// Render `args`; fails if rendering errors or would exceed the capacity
    pub(crate) fn render(mut self, args: fmt::Arguments<'_>) -> Result<Self, DispatchError> {
        fmt::write(&mut self, args).map_err(|_| DispatchError::Render)?;
        Ok(self)
    }

    pub(crate) fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.text.len() + s.len() > self.limit {
            return Err(fmt::Error);
        }
        self.text.push_str(s);
        Ok(())
    }
}

/// Length in bytes `args` renders to, without writing it anywhere
pub(crate) fn measure(args: fmt::Arguments<'_>) -> Result<usize, DispatchError> {
    if let Some(s) = args.as_str() {
        return Ok(s.len());
    }

    struct Counter(usize);

    impl fmt::Write for Counter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 += s.len();
            Ok(())
        }
    }

    let mut counter = Counter(0);
    fmt::write(&mut counter, args).map_err(|_| DispatchError::Measure)?;
    Ok(counter.0)
}
