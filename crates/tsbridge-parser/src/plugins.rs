//! Built-in plugins
//!
//! | plugin | order | role |
//! |---|---|---|
//! | `backbone` | 0 | endpoint operations and entity schemas |
//! | `transfer-types` | 5 | framework types replaced by mapped equivalents |
//! | `nonnull` | 10 | non-null annotations clear `nullable` |
//! | `generics` | 20 | generic use sites specialised into concrete schemas |
//! | `subtypes` | 30 | sealed hierarchies become discriminated unions |

pub mod backbone;
pub mod generics;
pub mod nonnull;
pub mod subtypes;
pub mod transfer_types;

pub use backbone::BackbonePlugin;
pub use generics::GenericsPlugin;
pub use nonnull::NonnullPlugin;
pub use subtypes::SubtypesPlugin;
pub use transfer_types::TransferTypesPlugin;

use crate::plugin::Plugin;

/// Every built-in plugin in registration order
pub fn builtin_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(BackbonePlugin),
        Box::new(TransferTypesPlugin),
        Box::new(NonnullPlugin),
        Box::new(GenericsPlugin),
        Box::new(SubtypesPlugin),
    ]
}
