//! Binary available-commands descriptor for the cmdgram toolchain.
//!
//! The registry serializes its compiled grammar into this self-contained
//! descriptor for a remote client's autocompletion. The layout is fixed and
//! little-endian; see [`codec`] for the field widths. Encoding the same
//! descriptor twice always produces byte-identical output, and any index that
//! does not fit its wire field width fails loudly with
//! [`EncodeError::LimitExceeded`] instead of truncating.

#![warn(missing_docs)]

mod codec;
mod descriptor;
mod error;

pub use codec::{WIRE_FORMAT_VERSION, decode, encode};
pub use descriptor::{
    ChainedSubcommandDescriptor, CommandDescriptor, ConstrainedValueDescriptor, Descriptor,
    EnumDescriptor, OverloadDescriptor, ParamDescriptor, SoftEnumDescriptor,
};
pub use error::{DecodeError, EncodeError};
