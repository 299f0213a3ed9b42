//! NZB 1.0 serialization.

use quick_xml::events::{BytesStart, BytesText, Event};

use crate::{
	Descriptor, NzbFile, Result,
	xml::{self, XmlWriter},
};

pub const NZB_XMLNS: &str = "http://www.newzbin.com/DTD/2003/nzb";
pub const NZB_MIME: &str = "application/x-nzb";

const NZB_DOCTYPE: &str =
	r#"nzb PUBLIC "-//newzBin//DTD NZB 1.0//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.0.dtd""#;

pub fn render_nzb(descriptor: &Descriptor) -> Result<String> {
	let mut writer = xml::writer_with_declaration()?;

	xml::emit(&mut writer, Event::DocType(BytesText::from_escaped(NZB_DOCTYPE)))?;
	xml::newline(&mut writer);
	xml::start(&mut writer, BytesStart::new("nzb").with_attributes([("xmlns", NZB_XMLNS)]))?;

	for file in &descriptor.files {
		write_file(&mut writer, file)?;
	}

	xml::end(&mut writer, "nzb")?;

	xml::finish(writer)
}

fn write_file(writer: &mut XmlWriter, file: &NzbFile) -> Result<()> {
	let date = file.date.to_string();

	xml::start(
		writer,
		BytesStart::new("file").with_attributes([
			("poster", file.poster.as_str()),
			("date", date.as_str()),
			("subject", file.subject.as_str()),
		]),
	)?;
	xml::start(writer, BytesStart::new("groups"))?;

	for group in &file.groups {
		xml::text_element(writer, "group", group)?;
	}

	xml::end(writer, "groups")?;
	xml::start(writer, BytesStart::new("segments"))?;

	for segment in &file.segments {
		let bytes = segment.bytes.to_string();
		let number = segment.number.to_string();

		xml::start(
			writer,
			BytesStart::new("segment")
				.with_attributes([("bytes", bytes.as_str()), ("number", number.as_str())]),
		)?;
		xml::emit(writer, Event::Text(BytesText::new(&segment.message_id)))?;
		xml::end(writer, "segment")?;
	}

	xml::end(writer, "segments")?;

	xml::end(writer, "file")
}
