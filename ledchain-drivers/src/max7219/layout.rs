//! Logical-to-physical module mapping
//!
//! The canvas numbers modules left to right. The SPI transfer numbers
//! them by when their word is clocked out. Which one comes first depends
//! on how the chain is wired, so the mapping lives here and nowhere else.

use ledchain_core::canvas::MAX_MODULES;
use ledchain_core::config::ChainOrder;

/// Translation table from canvas index to transfer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChainLayout {
    module_count: u8,
    order: ChainOrder,
    slots: [u8; MAX_MODULES],
}

impl ChainLayout {
    /// Build the table for a chain
    ///
    /// Returns `None` for module counts outside `1..=MAX_MODULES`.
    pub fn new(module_count: usize, order: ChainOrder) -> Option<Self> {
        if module_count == 0 || module_count > MAX_MODULES {
            return None;
        }

        let mut slots = [0u8; MAX_MODULES];
        for (logical, slot) in slots.iter_mut().take(module_count).enumerate() {
            *slot = match order {
                ChainOrder::Reversed => (module_count - 1 - logical) as u8,
                ChainOrder::Forward => logical as u8,
            };
        }

        Some(Self {
            module_count: module_count as u8,
            order,
            slots,
        })
    }

    /// Number of modules in the chain
    pub fn module_count(&self) -> usize {
        self.module_count as usize
    }

    /// Configured addressing order
    pub fn order(&self) -> ChainOrder {
        self.order
    }

    /// Transfer slot for a canvas index (slot 0 is clocked out first)
    pub fn slot(&self, logical: usize) -> Option<usize> {
        if logical >= self.module_count() {
            return None;
        }
        Some(self.slots[logical] as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_layout() {
        let layout = ChainLayout::new(4, ChainOrder::Reversed).unwrap();
        assert_eq!(layout.slot(0), Some(3));
        assert_eq!(layout.slot(3), Some(0));
        assert_eq!(layout.slot(4), None);
    }

    #[test]
    fn test_forward_layout() {
        let layout = ChainLayout::new(3, ChainOrder::Forward).unwrap();
        assert_eq!(layout.slot(0), Some(0));
        assert_eq!(layout.slot(2), Some(2));
    }

    #[test]
    fn test_bad_module_count() {
        assert!(ChainLayout::new(0, ChainOrder::Reversed).is_none());
        assert!(ChainLayout::new(MAX_MODULES + 1, ChainOrder::Forward).is_none());
        assert!(ChainLayout::new(MAX_MODULES, ChainOrder::Forward).is_some());
    }
}
