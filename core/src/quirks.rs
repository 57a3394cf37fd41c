/// # Quirks
/// Switches for the instructions whose reference behaviour differs from conventional Chip-8.
///
/// | quirk                      | off                          | on                                  |
/// |----------------------------|------------------------------|-------------------------------------|
/// | `compare_register_index`   | 3XNN/4XNN compare Vx with NN | 3XNN/4XNN compare x itself with NN  |
/// | `increment_index_on_load`  | FX65 leaves I alone          | FX65 sets I to I + x + 1            |
/// | `return_skips_slot`        | 00EE resumes at the popped address | 00EE resumes 2 bytes past it  |
/// | `wrap_sprites`             | DXYN clips at the screen edge | DXYN wraps to the opposite edge    |
///
/// `Default` is conventional Chip-8 and departs from the reference interpreter on 3XNN/4XNN and
/// on 00EE: the reference always advances the pc by 2 after popping, so a return lands one
/// instruction past the one after the call. `Quirks::reference()` restores both.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quirks {
    pub compare_register_index: bool,
    pub increment_index_on_load: bool,
    pub return_skips_slot: bool,
    pub wrap_sprites: bool,
}

impl Quirks {
    /// Reproduces the reference interpreter exactly
    pub fn reference() -> Self {
        Quirks {
            compare_register_index: true,
            increment_index_on_load: true,
            return_skips_slot: true,
            wrap_sprites: false,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            compare_register_index: false,
            increment_index_on_load: true,
            return_skips_slot: false,
            wrap_sprites: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_departs_from_reference() {
        let default = Quirks::default();
        let reference = Quirks::reference();
        assert!(!default.return_skips_slot && reference.return_skips_slot);
        assert!(!default.compare_register_index && reference.compare_register_index);
        assert_eq!(default.increment_index_on_load, reference.increment_index_on_load);
        assert_eq!(default.wrap_sprites, reference.wrap_sprites);
    }
}
