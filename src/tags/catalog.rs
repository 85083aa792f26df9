//! Static tag tables: the declared type of every known key.
//!
//! Entries carry the type names the metadata engine reports, so they go through
//! the same parsing as types read from an image.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// EXIF groups whose tags live in a vendor maker note.
const MAKER_NOTE_GROUPS: &[&str] = &[
    "Canon",
    "CanonCs",
    "CanonSi",
    "CanonCf",
    "CanonPi",
    "CanonFi",
    "Casio",
    "Casio2",
    "Fujifilm",
    "Minolta",
    "MinoltaCs5D",
    "MinoltaCs7D",
    "Nikon1",
    "Nikon2",
    "Nikon3",
    "NikonLd1",
    "NikonLd2",
    "NikonLd3",
    "Olympus",
    "Olympus2",
    "OlympusCs",
    "OlympusEq",
    "OlympusFi",
    "OlympusIp",
    "OlympusRd",
    "Panasonic",
    "PanasonicRaw",
    "Pentax",
    "PentaxDng",
    "Samsung2",
    "Sigma",
    "Sony1",
    "Sony2",
    "SonyMinolta",
];

const EXIF_TAGS: &[(&str, &str)] = &[
    // Image
    ("Exif.Image.ProcessingSoftware", "Ascii"),
    ("Exif.Image.NewSubfileType", "Long"),
    ("Exif.Image.ImageWidth", "Long"),
    ("Exif.Image.ImageLength", "Long"),
    ("Exif.Image.BitsPerSample", "Short"),
    ("Exif.Image.Compression", "Short"),
    ("Exif.Image.PhotometricInterpretation", "Short"),
    ("Exif.Image.ImageDescription", "Ascii"),
    ("Exif.Image.Make", "Ascii"),
    ("Exif.Image.Model", "Ascii"),
    ("Exif.Image.Orientation", "Short"),
    ("Exif.Image.SamplesPerPixel", "Short"),
    ("Exif.Image.XResolution", "Rational"),
    ("Exif.Image.YResolution", "Rational"),
    ("Exif.Image.ResolutionUnit", "Short"),
    ("Exif.Image.Software", "Ascii"),
    ("Exif.Image.DateTime", "Ascii"),
    ("Exif.Image.Artist", "Ascii"),
    ("Exif.Image.HostComputer", "Ascii"),
    ("Exif.Image.Copyright", "Ascii"),
    ("Exif.Image.TimeZoneOffset", "SShort"),
    ("Exif.Image.BaselineExposure", "SRational"),
    ("Exif.Image.DateTimeOriginal", "Ascii"),
    ("Exif.Image.Rating", "Short"),
    ("Exif.Image.RatingPercent", "Short"),
    ("Exif.Image.XPTitle", "Byte"),
    ("Exif.Image.XPComment", "Byte"),
    ("Exif.Image.XPAuthor", "Byte"),
    ("Exif.Image.XPKeywords", "Byte"),
    ("Exif.Image.XPSubject", "Byte"),
    ("Exif.Image.ExifTag", "Long"),
    ("Exif.Image.GPSTag", "Long"),
    // Photo
    ("Exif.Photo.ExposureTime", "Rational"),
    ("Exif.Photo.FNumber", "Rational"),
    ("Exif.Photo.ExposureProgram", "Short"),
    ("Exif.Photo.ISOSpeedRatings", "Short"),
    ("Exif.Photo.ExifVersion", "Undefined"),
    ("Exif.Photo.DateTimeOriginal", "Ascii"),
    ("Exif.Photo.DateTimeDigitized", "Ascii"),
    ("Exif.Photo.OffsetTime", "Ascii"),
    ("Exif.Photo.OffsetTimeOriginal", "Ascii"),
    ("Exif.Photo.ComponentsConfiguration", "Undefined"),
    ("Exif.Photo.ShutterSpeedValue", "SRational"),
    ("Exif.Photo.ApertureValue", "Rational"),
    ("Exif.Photo.BrightnessValue", "SRational"),
    ("Exif.Photo.ExposureBiasValue", "SRational"),
    ("Exif.Photo.MaxApertureValue", "Rational"),
    ("Exif.Photo.SubjectDistance", "Rational"),
    ("Exif.Photo.MeteringMode", "Short"),
    ("Exif.Photo.LightSource", "Short"),
    ("Exif.Photo.Flash", "Short"),
    ("Exif.Photo.FocalLength", "Rational"),
    ("Exif.Photo.MakerNote", "Undefined"),
    ("Exif.Photo.UserComment", "Comment"),
    ("Exif.Photo.SubSecTime", "Ascii"),
    ("Exif.Photo.SubSecTimeOriginal", "Ascii"),
    ("Exif.Photo.FlashpixVersion", "Undefined"),
    ("Exif.Photo.ColorSpace", "Short"),
    ("Exif.Photo.PixelXDimension", "Long"),
    ("Exif.Photo.PixelYDimension", "Long"),
    ("Exif.Photo.FileSource", "Undefined"),
    ("Exif.Photo.SceneType", "Undefined"),
    ("Exif.Photo.ExposureMode", "Short"),
    ("Exif.Photo.WhiteBalance", "Short"),
    ("Exif.Photo.DigitalZoomRatio", "Rational"),
    ("Exif.Photo.FocalLengthIn35mmFilm", "Short"),
    ("Exif.Photo.SceneCaptureType", "Short"),
    ("Exif.Photo.ImageUniqueID", "Ascii"),
    ("Exif.Photo.CameraOwnerName", "Ascii"),
    ("Exif.Photo.BodySerialNumber", "Ascii"),
    ("Exif.Photo.LensMake", "Ascii"),
    ("Exif.Photo.LensModel", "Ascii"),
    // GPS
    ("Exif.GPSInfo.GPSVersionID", "Byte"),
    ("Exif.GPSInfo.GPSLatitudeRef", "Ascii"),
    ("Exif.GPSInfo.GPSLatitude", "Rational"),
    ("Exif.GPSInfo.GPSLongitudeRef", "Ascii"),
    ("Exif.GPSInfo.GPSLongitude", "Rational"),
    ("Exif.GPSInfo.GPSAltitudeRef", "Byte"),
    ("Exif.GPSInfo.GPSAltitude", "Rational"),
    ("Exif.GPSInfo.GPSTimeStamp", "Rational"),
    ("Exif.GPSInfo.GPSSatellites", "Ascii"),
    ("Exif.GPSInfo.GPSMapDatum", "Ascii"),
    ("Exif.GPSInfo.GPSProcessingMethod", "Comment"),
    ("Exif.GPSInfo.GPSAreaInformation", "Comment"),
    ("Exif.GPSInfo.GPSDateStamp", "Ascii"),
    ("Exif.GPSInfo.GPSDifferential", "Short"),
    // Interoperability
    ("Exif.Iop.InteroperabilityIndex", "Ascii"),
    ("Exif.Iop.InteroperabilityVersion", "Undefined"),
    // IFD1
    ("Exif.Thumbnail.Compression", "Short"),
    ("Exif.Thumbnail.XResolution", "Rational"),
    ("Exif.Thumbnail.YResolution", "Rational"),
    ("Exif.Thumbnail.ResolutionUnit", "Short"),
    ("Exif.Thumbnail.JPEGInterchangeFormat", "Long"),
    ("Exif.Thumbnail.JPEGInterchangeFormatLength", "Long"),
    // Maker notes
    ("Exif.Canon.OwnerName", "Ascii"),
    ("Exif.Canon.ModelID", "Long"),
    ("Exif.Nikon3.Quality", "Ascii"),
    ("Exif.Nikon3.ISOSpeed", "Short"),
    ("Exif.OlympusCs.ManometerReading", "SLong"),
    ("Exif.Pentax.Temperature", "SByte"),
];

/// `(key, type, repeatable)`
const IPTC_TAGS: &[(&str, &str, bool)] = &[
    // Envelope record
    ("Iptc.Envelope.ModelVersion", "Short", false),
    ("Iptc.Envelope.Destination", "String", true),
    ("Iptc.Envelope.FileFormat", "Short", false),
    ("Iptc.Envelope.FileVersion", "Short", false),
    ("Iptc.Envelope.ServiceId", "String", false),
    ("Iptc.Envelope.EnvelopeNumber", "String", false),
    ("Iptc.Envelope.ProductId", "String", true),
    ("Iptc.Envelope.EnvelopePriority", "String", false),
    ("Iptc.Envelope.DateSent", "Date", false),
    ("Iptc.Envelope.TimeSent", "Time", false),
    ("Iptc.Envelope.CharacterSet", "Undefined", false),
    ("Iptc.Envelope.UNO", "String", false),
    // Application record
    ("Iptc.Application2.RecordVersion", "Short", false),
    ("Iptc.Application2.ObjectType", "String", false),
    ("Iptc.Application2.ObjectName", "String", false),
    ("Iptc.Application2.EditStatus", "String", false),
    ("Iptc.Application2.Urgency", "String", false),
    ("Iptc.Application2.Subject", "String", true),
    ("Iptc.Application2.Category", "String", false),
    ("Iptc.Application2.SuppCategory", "String", true),
    ("Iptc.Application2.Keywords", "String", true),
    ("Iptc.Application2.LocationCode", "String", true),
    ("Iptc.Application2.LocationName", "String", true),
    ("Iptc.Application2.ReleaseDate", "Date", false),
    ("Iptc.Application2.ReleaseTime", "Time", false),
    ("Iptc.Application2.ExpirationDate", "Date", false),
    ("Iptc.Application2.ExpirationTime", "Time", false),
    ("Iptc.Application2.SpecialInstructions", "String", false),
    ("Iptc.Application2.ReferenceDate", "Date", true),
    ("Iptc.Application2.DateCreated", "Date", false),
    ("Iptc.Application2.TimeCreated", "Time", false),
    ("Iptc.Application2.DigitizationDate", "Date", false),
    ("Iptc.Application2.DigitizationTime", "Time", false),
    ("Iptc.Application2.Program", "String", false),
    ("Iptc.Application2.ProgramVersion", "String", false),
    ("Iptc.Application2.Byline", "String", true),
    ("Iptc.Application2.BylineTitle", "String", true),
    ("Iptc.Application2.City", "String", false),
    ("Iptc.Application2.SubLocation", "String", false),
    ("Iptc.Application2.ProvinceState", "String", false),
    ("Iptc.Application2.CountryCode", "String", false),
    ("Iptc.Application2.CountryName", "String", false),
    ("Iptc.Application2.TransmissionReference", "String", false),
    ("Iptc.Application2.Headline", "String", false),
    ("Iptc.Application2.Credit", "String", false),
    ("Iptc.Application2.Source", "String", false),
    ("Iptc.Application2.Copyright", "String", false),
    ("Iptc.Application2.Contact", "String", true),
    ("Iptc.Application2.Caption", "String", false),
    ("Iptc.Application2.Writer", "String", true),
    ("Iptc.Application2.ImageType", "String", false),
    ("Iptc.Application2.Language", "String", false),
    ("Iptc.Application2.PreviewFormat", "Short", false),
    ("Iptc.Application2.PreviewVersion", "Short", false),
    ("Iptc.Application2.Preview", "Undefined", false),
];

/// Keyed by `prefix.property`.
const XMP_TAGS: &[(&str, &str)] = &[
    // Dublin Core
    ("dc.contributor", "bag ProperName"),
    ("dc.coverage", "Text"),
    ("dc.creator", "seq ProperName"),
    ("dc.date", "seq Date"),
    ("dc.description", "Lang Alt"),
    ("dc.format", "MIMEType"),
    ("dc.identifier", "Text"),
    ("dc.language", "bag Locale"),
    ("dc.publisher", "bag ProperName"),
    ("dc.relation", "bag Text"),
    ("dc.rights", "Lang Alt"),
    ("dc.source", "Text"),
    ("dc.subject", "bag Text"),
    ("dc.title", "Lang Alt"),
    ("dc.type", "bag Open Choice of Text"),
    // XMP basic
    ("xmp.Advisory", "bag XPath"),
    ("xmp.BaseURL", "URL"),
    ("xmp.CreateDate", "Date"),
    ("xmp.CreatorTool", "AgentName"),
    ("xmp.Identifier", "bag Text"),
    ("xmp.Label", "Text"),
    ("xmp.MetadataDate", "Date"),
    ("xmp.ModifyDate", "Date"),
    ("xmp.Nickname", "Text"),
    ("xmp.Rating", "Closed Choice of Real"),
    ("xmp.Thumbnails", "alt Thumbnail"),
    // Rights management
    ("xmpRights.Certificate", "URL"),
    ("xmpRights.Marked", "Boolean"),
    ("xmpRights.Owner", "bag ProperName"),
    ("xmpRights.UsageTerms", "Lang Alt"),
    ("xmpRights.WebStatement", "URL"),
    // Media management
    ("xmpMM.DocumentID", "URI"),
    ("xmpMM.InstanceID", "URI"),
    ("xmpMM.OriginalDocumentID", "URI"),
    ("xmpMM.SaveID", "Integer"),
    ("xmpMM.VersionID", "Text"),
    // Dynamic media
    ("xmpDM.audioSampleRate", "Integer"),
    ("xmpDM.scene", "Text"),
    ("xmpDM.videoFrameRate", "Open Choice of Text"),
    ("xmpDM.videoPixelAspectRatio", "Rational"),
    // Paged text
    ("xmpTPg.NPages", "Integer"),
    ("xmpTPg.MaxPageSize", "Dimensions"),
    ("xmpTPg.Fonts", "bag Font"),
    ("xmpTPg.Colorants", "seq Colorant"),
    // Photoshop
    ("photoshop.AuthorsPosition", "Text"),
    ("photoshop.CaptionWriter", "ProperName"),
    ("photoshop.Category", "Text"),
    ("photoshop.City", "Text"),
    ("photoshop.Country", "Text"),
    ("photoshop.Credit", "Text"),
    ("photoshop.DateCreated", "Date"),
    ("photoshop.Headline", "Text"),
    ("photoshop.Instructions", "Text"),
    ("photoshop.Source", "Text"),
    ("photoshop.State", "Text"),
    ("photoshop.SupplementalCategories", "bag Text"),
    ("photoshop.TransmissionReference", "Text"),
    ("photoshop.Urgency", "Integer"),
    // TIFF
    ("tiff.ImageWidth", "Integer"),
    ("tiff.ImageLength", "Integer"),
    ("tiff.BitsPerSample", "seq Integer"),
    ("tiff.Orientation", "Closed Choice of Integer"),
    ("tiff.XResolution", "Rational"),
    ("tiff.YResolution", "Rational"),
    ("tiff.DateTime", "Date"),
    ("tiff.ImageDescription", "Lang Alt"),
    ("tiff.Make", "ProperName"),
    ("tiff.Model", "ProperName"),
    ("tiff.Software", "AgentName"),
    ("tiff.Artist", "ProperName"),
    ("tiff.Copyright", "Lang Alt"),
    // EXIF
    ("exif.ExifVersion", "Closed Choice of Text"),
    ("exif.PixelXDimension", "Integer"),
    ("exif.PixelYDimension", "Integer"),
    ("exif.UserComment", "Lang Alt"),
    ("exif.DateTimeOriginal", "Date"),
    ("exif.DateTimeDigitized", "Date"),
    ("exif.ExposureTime", "Rational"),
    ("exif.FNumber", "Rational"),
    ("exif.ISOSpeedRatings", "seq Integer"),
    ("exif.FocalLength", "Rational"),
    ("exif.GPSVersionID", "Text"),
    ("exif.GPSLatitude", "GPSCoordinate"),
    ("exif.GPSLongitude", "GPSCoordinate"),
    ("exif.GPSAltitude", "Rational"),
    ("exif.GPSDestLatitude", "GPSCoordinate"),
    ("exif.GPSDestLongitude", "GPSCoordinate"),
    ("exif.GPSTimeStamp", "Date"),
    // EXIF auxiliary
    ("aux.Lens", "Text"),
    ("aux.SerialNumber", "Text"),
    ("aux.Firmware", "Text"),
    // PDF
    ("pdf.Keywords", "Text"),
    ("pdf.PDFVersion", "Text"),
    ("pdf.Producer", "AgentName"),
    // IPTC Core
    ("iptc.CountryCode", "Closed Choice of Text"),
    ("iptc.IntellectualGenre", "Text"),
    ("iptc.Location", "Text"),
    ("iptc.Scene", "bag Closed Choice of Text"),
    ("iptc.SubjectCode", "bag Closed Choice of Text"),
    // Lightroom
    ("lr.hierarchicalSubject", "bag Text"),
];

lazy_static! {
    static ref EXIF_INDEX: HashMap<&'static str, &'static str> =
        EXIF_TAGS.iter().copied().collect();
    static ref IPTC_INDEX: HashMap<&'static str, (&'static str, bool)> = IPTC_TAGS
        .iter()
        .map(|&(key, ty, repeatable)| (key, (ty, repeatable)))
        .collect();
    static ref XMP_INDEX: HashMap<&'static str, &'static str> =
        XMP_TAGS.iter().copied().collect();
}

/// Declared type of a known EXIF key.
pub fn exif_type_name(key: &str) -> Option<&'static str> {
    EXIF_INDEX.get(key).copied()
}

/// `true` for EXIF groups that belong to a vendor maker note.
pub fn is_maker_note_group(group: &str) -> bool {
    MAKER_NOTE_GROUPS.contains(&group)
}

/// Declared type and repeatability of a known IPTC key.
pub fn iptc_info(key: &str) -> Option<(&'static str, bool)> {
    IPTC_INDEX.get(key).copied()
}

/// Declared type of a known XMP property, or `None` for properties the
/// catalog does not describe.
pub fn xmp_type_name(prefix: &str, property: &str) -> Option<&'static str> {
    XMP_INDEX
        .get(format!("{prefix}.{property}").as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(exif_type_name("Exif.Photo.UserComment"), Some("Comment"));
        assert_eq!(exif_type_name("Exif.Photo.Nope"), None);
        assert_eq!(iptc_info("Iptc.Application2.City"), Some(("String", false)));
        assert_eq!(
            iptc_info("Iptc.Application2.Keywords"),
            Some(("String", true))
        );
        assert_eq!(xmp_type_name("dc", "creator"), Some("seq ProperName"));
        assert_eq!(xmp_type_name("dc", "Subject"), None);
    }

    #[test]
    fn maker_note_groups() {
        assert!(is_maker_note_group("Canon"));
        assert!(is_maker_note_group("OlympusCs"));
        assert!(!is_maker_note_group("Photo"));
    }

    #[test]
    fn no_duplicate_keys() {
        assert_eq!(EXIF_INDEX.len(), EXIF_TAGS.len());
        assert_eq!(IPTC_INDEX.len(), IPTC_TAGS.len());
        assert_eq!(XMP_INDEX.len(), XMP_TAGS.len());
    }
}
