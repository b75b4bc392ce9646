mod common;

use predicates::prelude::*;
use tagmend_core::AnyEmptyResult;

#[test]
fn normalize_writes_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("out/normalized.docx");
	common::write_docx(&input, common::FRAGMENTED_NAME)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--output")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicate::str::contains("Done. Reconstructed 1 tag(s). Output:"))
		.stdout(predicate::str::contains(output.display().to_string()));

	assert!(common::read_document(&output)?.contains("<w:r><w:t>{{name}}</w:t></w:r>"));
	// The input is left untouched.
	assert!(common::read_document(&input)?.contains(common::FRAGMENTED_NAME));

	Ok(())
}

#[test]
fn normalize_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	common::write_docx(&input, common::FRAGMENTED_NAME)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--inplace")
		.assert()
		.success()
		.stdout(predicate::str::contains("Wrote in-place:"));

	assert!(common::read_document(&input)?.contains("{{name}}"));

	Ok(())
}

#[test]
fn missing_destination_is_a_usage_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	common::write_docx(&input, common::FRAGMENTED_NAME)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.assert()
		.failure()
		.code(2)
		.stderr(predicate::str::contains("--output"))
		.stderr(predicate::str::contains("Usage"));

	assert!(common::read_document(&input)?.contains(common::FRAGMENTED_NAME));

	Ok(())
}

#[test]
fn output_and_inplace_conflict() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(&input, common::FRAGMENTED_NAME)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("--inplace")
		.assert()
		.failure()
		.code(2)
		.stderr(predicate::str::contains("cannot be used with"));

	assert!(!output.exists());
	assert!(common::read_document(&input)?.contains(common::FRAGMENTED_NAME));

	Ok(())
}

#[test]
fn missing_input_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let output = tmp.path().join("normalized.docx");

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(tmp.path().join("missing.docx"))
		.arg("-o")
		.arg(&output)
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("input document not found"));

	assert!(!output.exists());

	Ok(())
}

#[test]
fn square_family_requires_flag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(&input, common::FRAGMENTED_SQUARE)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicate::str::contains("Reconstructed 0 tag(s)"));

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("--enable-square")
		.assert()
		.success()
		.stdout(predicate::str::contains("Reconstructed 1 tag(s)"));

	assert!(common::read_document(&output)?.contains("<w:r><w:t>[[total]]</w:t></w:r>"));

	Ok(())
}

#[test]
fn config_enables_square_family() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(&input, common::FRAGMENTED_SQUARE)?;
	std::fs::write(tmp.path().join("tagmend.toml"), "[delimiters]\nsquare = true\n")?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicate::str::contains("Reconstructed 1 tag(s)"));

	Ok(())
}

#[test]
fn list_tags_prints_detected_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(
		&input,
		&format!("{}<w:r><w:t>{{{{ other }}}} {{{{name}}}}</w:t></w:r>", common::FRAGMENTED_NAME),
	)?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("--list-tags")
		.assert()
		.success()
		.stdout(predicate::str::contains("Reconstructed 2 tag(s)"))
		.stdout(predicate::str::contains("Detected tags: name, other"));

	Ok(())
}

#[test]
fn list_tags_reports_none() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(&input, "<w:r><w:t>no placeholders</w:t></w:r>")?;

	common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("--list-tags")
		.assert()
		.success()
		.stdout(predicate::str::contains("No tags detected."));

	Ok(())
}

#[test]
fn json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.docx");
	let output = tmp.path().join("normalized.docx");
	common::write_docx(&input, common::FRAGMENTED_NAME)?;

	let assert = common::tagmend_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("--list-tags")
		.arg("--format")
		.arg("json")
		.assert()
		.success();

	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
	let value: serde_json::Value = serde_json::from_str(stdout.trim())?;
	assert_eq!(value["reconstructed"], 1);
	assert_eq!(value["inPlace"], false);
	assert_eq!(value["output"], output.display().to_string());
	assert_eq!(value["tags"], serde_json::json!(["name"]));

	Ok(())
}
