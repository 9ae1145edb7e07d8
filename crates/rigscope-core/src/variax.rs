//! Decoding modeled-instrument (Variax) model ids.
//!
//! Model ids are grouped in banks of five consecutive ids. Within a bank the
//! variant number counts *down*: id 1 is variant 5 of bank 0, id 5 is
//! variant 1 of bank 0, id 6 is variant 5 of bank 1. This matches the numbering
//! the instrument's model knob shows and is kept as-is.

use rigscope_config::InstrumentFamily;

/// Label used for id 0 and for ids beyond the last bank.
pub const GENERIC_INSTRUMENT_LABEL: &str = "Variax";

/// Number of consecutive ids per bank.
pub const BANK_SIZE: u32 = 5;

/// Number of banks per family.
pub const BANK_COUNT: usize = 12;

const JTV_BANKS: [&str; BANK_COUNT] = [
    "Custom 1", "T-Model", "Spank", "Lester", "Special", "R-Billy", "Chime", "Semi", "Jazzbox",
    "Acoustic", "Reso", "Custom 2",
];

const SHURIKEN_BANKS: [&str; BANK_COUNT] = [
    "Shuriken", "T-Model", "Spank", "Lester", "Acoustic", "Jazz", "World", "Twang", "User I",
    "User II", "User III", "User IV",
];

/// Bank-name table of a family, in bank order.
pub const fn bank_names(family: InstrumentFamily) -> &'static [&'static str; BANK_COUNT] {
    match family {
        InstrumentFamily::Jtv => &JTV_BANKS,
        InstrumentFamily::Shuriken => &SHURIKEN_BANKS,
    }
}

/// Bank index and variant number of a non-zero model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSlot {
    /// Zero-based bank index (may exceed the family's table).
    pub bank: u32,
    /// Variant within the bank, 5 down to 1.
    pub variant: u32,
}

/// Split a model id into bank and variant. Id 0 has no slot.
pub const fn decode_model_id(model_id: u32) -> Option<ModelSlot> {
    if model_id == 0 {
        return None;
    }
    let offset = model_id - 1;
    Some(ModelSlot {
        bank: offset / BANK_SIZE,
        variant: BANK_SIZE - (offset % BANK_SIZE),
    })
}

/// Human label for a model id, e.g. `"Lester 3"`.
///
/// Id 0 yields [`GENERIC_INSTRUMENT_LABEL`]. Banks past the end of the
/// family's table use the generic label as their bank name.
pub fn resolve_instrument_name(model_id: u32, family: InstrumentFamily) -> String {
    let Some(slot) = decode_model_id(model_id) else {
        return GENERIC_INSTRUMENT_LABEL.to_string();
    };
    let bank = usize::try_from(slot.bank)
        .ok()
        .and_then(|i| bank_names(family).get(i))
        .copied()
        .unwrap_or(GENERIC_INSTRUMENT_LABEL);
    format!("{bank} {}", slot.variant)
}
