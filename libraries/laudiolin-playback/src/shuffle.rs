//! Random shuffle for track lists and queues

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle a slice in place using Fisher-Yates
///
/// Every element keeps exactly one slot: nothing is dropped or duplicated.
pub fn shuffle_random<T>(items: &mut [T]) {
    let mut rng = thread_rng();
    items.shuffle(&mut rng);
}
