/// Combine two blocks with the counter, then post-increment it.
/// The XOR uses the counter value from before the step.
#[inline]
pub fn forward_combine(counter: &mut u32, left: u32, right: u32) -> u32 {
    let current = *counter;
    *counter = current.wrapping_add(1);
    left ^ right ^ current
}

/// Pre-decrement the counter, then combine two blocks with it.
/// Undoes `forward_combine` when replayed in reverse call order.
#[inline]
pub fn backward_combine(counter: &mut u32, left: u32, right: u32) -> u32 {
    *counter = counter.wrapping_sub(1);
    left ^ right ^ *counter
}
