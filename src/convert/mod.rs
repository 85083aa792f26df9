//! Wire-text codecs shared by the tag families.
//!
//! - [`numeric`]: strict integers and rationals
//! - [`undefined`]: the EXIF `Undefined` byte-list text form
//! - [`datetime`]: EXIF, IPTC and XMP date/time conventions

pub mod datetime;
pub mod numeric;
pub mod undefined;
