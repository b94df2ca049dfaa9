use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn editor_defaults_warn_on_unsaved_changes() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert!(settings.editor.warn_when_unsaved_changes);
    assert_eq!(
        settings.editor.category_page_size.get(),
        DEFAULT_CATEGORY_PAGE_SIZE
    );
    assert_eq!(settings.editor.brand_title, "Quire");
    assert!(settings.database.url.is_none());
}

#[test]
fn blank_database_url_means_in_memory() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.database.url.is_none());
}

#[test]
fn category_page_size_is_bounded() {
    let mut raw = RawSettings::default();
    raw.editor.category_page_size = Some(MAX_PAGE_SIZE + 1);
    let err = Settings::from_raw(raw).expect_err("page size too large");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "editor.category_page_size",
            ..
        }
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["quire"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_migrate_arguments() {
    let args = CliArgs::parse_from(["quire", "migrate", "--database-url", "postgres://example"]);

    match args.command.expect("migrate command") {
        Command::Migrate(migrate) => {
            assert_eq!(
                migrate.database.database_url.as_deref(),
                Some("postgres://example")
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_editor_overrides() {
    let args = CliArgs::parse_from([
        "quire",
        "serve",
        "--editor-warn-unsaved",
        "false",
        "--editor-category-page-size",
        "25",
    ]);

    let Some(Command::Serve(serve)) = args.command else {
        panic!("expected serve command");
    };
    let mut raw = RawSettings::default();
    raw.apply_serve_overrides(&serve.overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(!settings.editor.warn_when_unsaved_changes);
    assert_eq!(settings.editor.category_page_size.get(), 25);
}
