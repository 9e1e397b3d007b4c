//! The equip passes.
//!
//! Each pass fills exactly one `Option` slot of the gathered records and
//! runs over the whole registry before the next one starts, so later passes
//! can rely on earlier slots being settled (map cases need enum members,
//! which need nothing but the gather).

mod maps;
mod types;

pub use maps::{equip_map_cases, equip_map_types};
pub use types::{
    equip_basic_sizes, equip_enum_members, equip_enum_underlying, equip_struct_members,
};
