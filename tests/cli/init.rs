use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"], serde_json::json!([]));
    assert_eq!(
        parsed["ignores"],
        serde_json::json!(["**/vendor/**", "**/node_modules/**"])
    );
    assert_eq!(parsed["extensions"], serde_json::json!(["php"]));
    assert!(
        parsed.get("domain").is_none(),
        "Unset domain should be omitted"
    );

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\u{2713} Created .makepotrc.json\n");
    assert!(test.root().join(".makepotrc.json").exists());

    let content = test.read_file(".makepotrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".makepotrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .makepotrc.json already exists\n");
    assert_eq!(test.read_file(".makepotrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("plugin.php", "<?php esc_html_e( 'Settings', 'my-plugin' );")?;

    let output = test
        .extract_command()
        .args(["--domain", "my-plugin"])
        .output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(
        test.read_file("languages/my-plugin.pot")?
            .contains("msgid \"Settings\"")
    );

    Ok(())
}
