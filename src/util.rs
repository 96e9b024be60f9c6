/// Shifts a dense id down by one if it lies above a removed id.
pub fn shift_down(id: usize, removed: usize) -> usize {
    if id > removed { id - 1 } else { id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_down() {
        assert_eq!(shift_down(5, 2), 4);
        assert_eq!(shift_down(1, 2), 1);
    }
}
