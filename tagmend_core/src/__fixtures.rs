use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::AnyEmptyResult;
use crate::AnyResult;

/// `{{name}}` as Word saves it after the tag was typed in several runs.
pub const FRAGMENTED_NAME: &str = "<w:r><w:t>{</w:t></w:r><w:r><w:t>{</w:t></w:r><w:r><w:t>name</w:t></w:r><w:r><w:t>}</w:t></w:r><w:r><w:t>}</w:t></w:r>";

pub const REPAIRED_NAME: &str = "<w:r><w:t>{{name}}</w:t></w:r>";

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

pub const PNG_BYTES: &[u8] = &[
	0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
	0x7b, 0x7b, 0xff, 0xfe, 0x7d, 0x7d,
];

/// Wrap paragraph content in a minimal `word/document.xml` body.
pub fn document_xml(paragraph: &str) -> String {
	format!(
		"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document \
		 xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:p>{paragraph}</w:p></w:body></w:document>"
	)
}

/// A run of text whose placeholder has been split around `name`.
pub fn fragmented(name: &str) -> String {
	format!(
		"<w:r><w:t>{{</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>{{ </w:t></w:r><w:r><w:t>{name}</w:t></w:r><w:r><w:t>}}</w:t></w:r><w:proofErr w:type=\"spellEnd\"/><w:r><w:t>}}</w:t></w:r>"
	)
}

pub fn write_container(path: &Path, entries: &[(&str, &[u8])]) -> AnyEmptyResult {
	write_container_with(path, entries, CompressionMethod::Deflated)
}

pub fn write_container_with(
	path: &Path,
	entries: &[(&str, &[u8])],
	method: CompressionMethod,
) -> AnyEmptyResult {
	let mut writer = ZipWriter::new(File::create(path)?);

	for (name, content) in entries {
		let options = SimpleFileOptions::default().compression_method(method);
		writer.start_file(*name, options)?;
		writer.write_all(content)?;
	}

	writer.finish()?;

	Ok(())
}

/// A small `.docx`-shaped container with `document` as the main part.
pub fn write_docx(path: &Path, document: &str) -> AnyEmptyResult {
	write_container(
		path,
		&[
			("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
			("word/document.xml", document.as_bytes()),
			("word/media/image1.png", PNG_BYTES),
		],
	)
}

pub fn entry_names(path: &Path) -> AnyResult<Vec<String>> {
	let mut archive = ZipArchive::new(File::open(path)?)?;
	let mut names = Vec::new();

	for index in 0..archive.len() {
		names.push(archive.by_index_raw(index)?.name().to_string());
	}

	Ok(names)
}

/// Decompressed content of the entry called `name`.
pub fn read_entry(path: &Path, name: &str) -> AnyResult<Vec<u8>> {
	let mut archive = ZipArchive::new(File::open(path)?)?;
	let mut entry = archive.by_name(name)?;
	let mut bytes = Vec::new();
	entry.read_to_end(&mut bytes)?;

	Ok(bytes)
}

pub fn read_entry_text(path: &Path, name: &str) -> AnyResult<String> {
	Ok(String::from_utf8(read_entry(path, name)?)?)
}

/// Stored (possibly compressed) bytes and compression method of the entry
/// called `name`.
pub fn read_raw_entry(path: &Path, name: &str) -> AnyResult<(Vec<u8>, CompressionMethod)> {
	let mut archive = ZipArchive::new(File::open(path)?)?;

	for index in 0..archive.len() {
		let mut entry = archive.by_index_raw(index)?;
		if entry.name() != name {
			continue;
		}

		let method = entry.compression();
		let mut bytes = Vec::new();
		entry.read_to_end(&mut bytes)?;

		return Ok((bytes, method));
	}

	Err(format!("no entry named `{name}`").into())
}
