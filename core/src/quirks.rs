/// Behavioral variation points where historical interpreters disagree.
///
/// Different ROMs assume different answers, so these are runtime toggles
/// rather than hard-coded policy. The defaults match the most common modern
/// expectations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `FX55`/`FX65`: increment I by X + 1 after the block store/load.
    /// Off (the default) leaves I unchanged.
    pub increment_index_on_block_io: bool,
    /// `FX1E`: wrap I at the 4KiB address space instead of at 16 bits.
    pub index_add_wraps_address_space: bool,
}

#[cfg(test)]
mod test_quirks {
    use super::*;

    #[test]
    fn test_defaults_leave_index_alone_and_wrap_16_bits() {
        let quirks = Quirks::default();
        assert!(!quirks.increment_index_on_block_io);
        assert!(!quirks.index_add_wraps_address_space);
    }
}
