//! Capacity-balanced bisection of an ordered room list.

use crate::models::{total_capacity, Room};

/// Splits rooms into two contiguous, non-empty groups of roughly equal
/// total capacity.
///
/// With exactly two rooms the split is `([first], [second])`. Otherwise the
/// left group is the shortest proper prefix holding at least half the total
/// capacity. If no proper prefix gets there, the last room dominates; the
/// slice is then reversed in place and scanned again, which puts the large
/// room alone on the left. The reversal is visible to the caller, so the
/// caller's room order always matches the two returned halves.
///
/// # Panics
///
/// Panics if fewer than two rooms are given.
///
/// # Examples
///
/// ```
/// use u_seating::models::Room;
/// use u_seating::partition::partition_rooms;
///
/// let mut rooms = vec![Room::new(0, 50), Room::new(1, 50), Room::new(2, 100)];
/// let (left, right) = partition_rooms(&mut rooms);
/// assert_eq!(left.len(), 2);
/// assert_eq!(right[0].id(), 2);
/// ```
pub fn partition_rooms(rooms: &mut [Room]) -> (&mut [Room], &mut [Room]) {
    assert!(rooms.len() > 1, "cannot partition fewer than 2 rooms");
    let at = match split_index(rooms) {
        Some(at) => at,
        None => {
            rooms.reverse();
            match split_index(rooms) {
                Some(at) => at,
                None => panic!("capacity partition failed after reversing {} rooms", rooms.len()),
            }
        }
    };
    rooms.split_at_mut(at)
}

/// Number of rooms in the left group, or `None` if no proper prefix reaches
/// half of the total capacity.
fn split_index(rooms: &[Room]) -> Option<usize> {
    if rooms.len() == 2 {
        return Some(1);
    }
    let total = total_capacity(rooms);
    let mut acc = 0u64;
    for (i, room) in rooms[..rooms.len() - 1].iter().enumerate() {
        acc += u64::from(room.capacity());
        if 2 * acc >= total {
            return Some(i + 1);
        }
    }
    None
}
