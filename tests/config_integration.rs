use std::path::PathBuf;

use tailview::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".tailviewrc");
    let content = r#"
# comment
--line-number

--header 1

--debug-log=tailview.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.line_number);
    assert_eq!(flags.header, Some(1));
    assert_eq!(flags.debug_log, Some(PathBuf::from("tailview.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".tailviewrc");
    let content = "--follow\n--tab-width 4\n--delimiter ;\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "tailview".to_string(),
        "--tab-width".to_string(),
        "2".to_string(),
        "--column-mode".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.follow, "file flags should remain enabled");
    assert!(effective.column_mode, "cli flags should be applied");
    assert_eq!(effective.tab_width, Some(2), "cli should override tab width");
    assert_eq!(
        effective.delimiter.as_deref(),
        Some(";"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "tailview".to_string(),
        "--header-color=#ff8800".to_string(),
        "--delimiter==".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.header_color.as_deref(), Some("#ff8800"));
    assert_eq!(flags.delimiter.as_deref(), Some("="));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_wrap: true,
        alternate_rows: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        exit_write: true,
        quit_if_one_screen: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.no_wrap);
    assert!(merged.alternate_rows);
    assert!(merged.exit_write);
    assert!(merged.quit_if_one_screen);
}
