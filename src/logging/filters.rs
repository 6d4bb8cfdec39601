use crate::logging::category::{Category, Verbosity};

/// Решает, нужно ли выводить запись данной категории при текущей маске.
///
/// Чистая побитовая проверка без приоритетов между категориями.
#[inline]
pub fn should_emit(
    category: Category,
    mask: Verbosity,
) -> bool {
    mask.intersects(category.bit())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_none_blocks_everything() {
        for category in Category::iter() {
            assert!(!should_emit(category, Verbosity::NONE), "{category}");
        }
    }

    #[test]
    fn test_all_allows_everything() {
        for category in Category::iter() {
            assert!(should_emit(category, Verbosity::ALL), "{category}");
        }
    }

    /// Маска только с error|fatal пропускает ровно две категории.
    #[test]
    fn test_error_and_fatal_only() {
        let mask = Verbosity::ERROR | Verbosity::FATAL;
        let allowed: Vec<Category> = Category::iter()
            .filter(|c| should_emit(*c, mask))
            .collect();
        assert_eq!(allowed, vec![Category::Error, Category::Fatal]);
    }

    /// Биты за пределами 0xFF ни на что не влияют.
    #[test]
    fn test_unknown_bits_are_ignored() {
        let mask = Verbosity::from_raw(0xFF00);
        assert!(Category::iter().all(|c| !should_emit(c, mask)));
    }

    proptest! {
        #[test]
        fn prop_emit_iff_bit_set(raw in any::<u32>(), idx in 0usize..8) {
            let category = Category::iter().nth(idx).unwrap();
            let expected = raw & (1u32 << idx) != 0;
            prop_assert_eq!(should_emit(category, Verbosity::from_raw(raw)), expected);
        }
    }
}
