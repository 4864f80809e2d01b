// Returns the home slot of `hash` in a table of `capacity` slots.
//
// Hashes are unsigned, so every hash (including one with the top bit set) maps into range
// without the sign handling a signed hash would need.
#[inline]
pub fn home(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

// Returns the number of slots needed to hold `len` entries without growing.
pub fn slots_for(len: usize, load_factor: f64) -> usize {
    // Growth fires once `len >= capacity * load_factor`, so we need strictly more room.
    ((len as f64 / load_factor).floor() as usize).saturating_add(1)
}

// A linear probe sequence.
//
// Starts at the home slot and steps by one, wrapping to zero after the last slot. The
// sequence yields every slot exactly once and then ends.
pub struct Probe {
    // The next index in the probe sequence.
    i: usize,
    // The number of slots left to visit.
    remaining: usize,
    // The length of the table.
    capacity: usize,
}

impl Probe {
    // Initialize the probe sequence at the home slot of `hash`.
    #[inline]
    pub fn start(hash: u64, capacity: usize) -> Probe {
        Probe {
            i: home(hash, capacity),
            remaining: capacity,
            capacity,
        }
    }

    // Initialize a probe sequence over the slots following `i`, ending before `i` is revisited.
    #[inline]
    pub fn after(i: usize, capacity: usize) -> Probe {
        Probe {
            i: next(i, capacity),
            remaining: capacity - 1,
            capacity,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let i = self.i;
        self.remaining -= 1;
        self.i = next(i, self.capacity);
        Some(i)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}

#[inline]
fn next(i: usize, capacity: usize) -> usize {
    if i == capacity - 1 {
        0
    } else {
        i + 1
    }
}

// Returns `true` if `i` lies in the cyclic half-open range `(start, end]`.
#[inline]
pub fn within(i: usize, start: usize, end: usize) -> bool {
    if start <= end {
        start < i && i <= end
    } else {
        start < i || i <= end
    }
}
