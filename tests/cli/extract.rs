use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout, template_filters};

const MAIN_PHP: &str = r#"<?php
printf(
	/* translators: %s: user name */
	__( 'Hello, %s!', 'my-plugin' ),
	$name
);
echo _n( 'One item', '%d items', $count, 'my-plugin' );
_e( 'Other domain', 'other' );
"#;

const ADMIN_PHP: &str = r#"<?php
echo esc_html_x( 'Post', 'noun', 'my-plugin' );
echo __( 'Hello, %s!', 'my-plugin' );
"#;

fn plugin() -> Result<CliTest> {
    let test = CliTest::with_file("main.php", MAIN_PHP)?;
    test.write_file("inc/admin.php", ADMIN_PHP)?;
    Ok(test)
}

#[test]
fn test_extract_writes_template() -> Result<()> {
    let test = plugin()?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Extracted 3 messages from 2 files into languages/my-plugin.pot\n"
    );

    let content = test.read_file("languages/my-plugin.pot")?;
    insta::with_settings!({ filters => template_filters() }, {
        insta::assert_snapshot!(content, @r##"
msgid ""
msgstr ""
"Project-Id-Version: my-plugin\n"
"Report-Msgid-Bugs-To: \n"
"POT-Creation-Date: [DATE]\n"
"PO-Revision-Date: YEAR-MO-DA HO:MI+0000\n"
"Last-Translator: \n"
"Language-Team: \n"
"Language: \n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"
"X-Generator: makepot [VERSION]\n"
"X-Domain: my-plugin\n"

#. %s: user name
#: inc/admin.php:3 main.php:4
msgid "Hello, %s!"
msgstr ""

#: main.php:7
msgid "One item"
msgid_plural "%d items"
msgstr[0] ""
msgstr[1] ""

#: inc/admin.php:2
msgctxt "noun"
msgid "Post"
msgstr ""
"##);
    });

    Ok(())
}

#[test]
fn test_extract_is_deterministic() -> Result<()> {
    let test = plugin()?;
    let strip_date = |content: String| {
        content
            .lines()
            .filter(|line| !line.starts_with("\"POT-Creation-Date"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    test.extract_command()
        .args(["--domain", "my-plugin", "-o", "first.pot"])
        .output()?;
    test.extract_command()
        .args(["--domain", "my-plugin", "-o", "second.pot"])
        .output()?;

    assert_eq!(
        strip_date(test.read_file("first.pot")?),
        strip_date(test.read_file("second.pot")?)
    );

    Ok(())
}

#[test]
fn test_extract_other_domain() -> Result<()> {
    let test = plugin()?;

    let output = test
        .extract_command()
        .args(["--domain", "other", "-o", "other.pot"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = test.read_file("other.pot")?;
    assert!(content.contains("#: main.php:8\nmsgid \"Other domain\"\nmsgstr \"\"\n"));
    assert!(!content.contains("Hello, %s!"));

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = plugin()?;
    test.write_file(
        ".makepotrc.json",
        r#"{
          "domain": "my-plugin",
          "output": "i18n/templates/plugin.pot",
          "ignores": ["inc"]
      }"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Extracted 2 messages from 1 file into i18n/templates/plugin.pot\n"
    );
    let content = test.read_file("i18n/templates/plugin.pot")?;
    assert!(content.contains("#: main.php:4\n"));
    assert!(!content.contains("inc/admin.php"));

    Ok(())
}

#[test]
fn test_cli_flags_override_config() -> Result<()> {
    let test = plugin()?;
    test.write_file(
        ".makepotrc.json",
        r#"{ "domain": "other", "output": "configured.pot" }"#,
    )?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin", "--output", "explicit.pot"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!test.root().join("configured.pot").exists());
    let content = test.read_file("explicit.pot")?;
    assert!(content.contains("\"X-Domain: my-plugin\\n\""));

    Ok(())
}

#[test]
fn test_source_root_names_default_domain() -> Result<()> {
    let test = CliTest::with_file(
        "acme-forms/acme-forms.php",
        "<?php _e( 'Submit', 'acme-forms' );\n",
    )?;
    test.write_file(
        "acme-forms/vendor/lib/lib.php",
        "<?php __( 'Vendored', 'acme-forms' );\n",
    )?;

    let output = test
        .extract_command()
        .args(["--source-root", "acme-forms"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = test.read_file("acme-forms/languages/acme-forms.pot")?;
    assert!(content.contains("#: acme-forms.php:1\nmsgid \"Submit\"\n"));
    assert!(!content.contains("Vendored"));

    Ok(())
}

#[test]
fn test_extract_empty_project_writes_header() -> Result<()> {
    let test = CliTest::with_file("readme.txt", "__( 'Not PHP', 'my-plugin' );")?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Extracted 0 messages from 0 files into languages/my-plugin.pot\n"
    );
    let content = test.read_file("languages/my-plugin.pot")?;
    assert!(content.starts_with("msgid \"\"\nmsgstr \"\"\n"));
    assert!(content.ends_with("\"X-Domain: my-plugin\\n\"\n"));

    Ok(())
}

#[test]
fn test_extract_tolerates_invalid_utf8() -> Result<()> {
    let test = CliTest::new()?;
    test.write_bytes(
        "legacy.php",
        b"<?php\n// \xff\xfe\n__( 'Still found', 'my-plugin' );\n",
    )?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = test.read_file("languages/my-plugin.pot")?;
    assert!(content.contains("#: legacy.php:3\nmsgid \"Still found\"\n"));

    Ok(())
}

#[test]
fn test_write_failure_exits_with_error() -> Result<()> {
    let test = plugin()?;
    test.write_file("blocker", "not a directory")?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin", "-o", "blocker/out.pot"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("failed to create directory blocker"),
        "stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let test = plugin()?;
    test.write_file(".makepotrc.json", "{ not json")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_missing_source_root_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .extract_command()
        .args(["--source-root", "missing", "--domain", "x"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source root is not a directory"));

    Ok(())
}

#[test]
fn test_no_subcommand_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("Usage:"));
    assert!(help.contains("extract"));
    assert!(help.contains("init"));

    Ok(())
}
