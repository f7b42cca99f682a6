//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests (rendered table layout)
//! - Config file -> ConfigLoader -> FileExporter -> destination file

#[cfg(test)]
mod contract_tests {
    use exporter::DEFAULT_TEMPLATE;

    #[test]
    fn test_default_template_header_is_frozen() {
        assert!(DEFAULT_TEMPLATE.starts_with(
            "# Dispatcher sets.\n# WARNING: THIS FILE IS AUTOMATICALLY GENERATED.\n\n"
        ));
    }

    #[test]
    fn test_default_template_uses_set_vocabulary() {
        let set = serde_json::to_value(contracts::DispatcherSet::new("1", ["a:5060"])).unwrap();
        for field in ["ID", "Endpoints"] {
            assert!(set.get(field).is_some(), "missing {field}");
            assert!(DEFAULT_TEMPLATE.contains(&format!("set.{field}")));
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;

    use config_loader::ConfigLoader;
    use contracts::{DispatcherSet, ExportErrorKind, Exporter, WriteMode};
    use exporter::{FileExporter, FileExporterConfig};
    use tempfile::tempdir;

    fn exporter_from_config(path: &Path) -> (FileExporter, Vec<DispatcherSet>) {
        let blueprint = ConfigLoader::load_from_path(path).unwrap();
        let exporter = FileExporter::with_config(FileExporterConfig::from_exporter_config(
            &blueprint.exporter,
        ))
        .unwrap();
        (exporter, blueprint.sets)
    }

    /// Parse the table the way kamailio does: `<set-id> <uri>` pairs,
    /// comment lines ignored
    fn parse_table(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| {
                let mut parts = l.split_whitespace();
                (
                    parts.next().unwrap().to_string(),
                    parts.next().unwrap().to_string(),
                )
            })
            .collect()
    }

    /// End-to-end: TOML config -> exporter -> flat file consumable by kamailio
    #[test]
    fn test_e2e_toml_config_to_dispatcher_list() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dispatcher.list");
        let config = dir.path().join("dispatchers.toml");
        fs::write(
            &config,
            format!(
                r#"
[exporter]
filename = {:?}

[[sets]]
id = "1"
endpoints = ["10.0.0.1:5060", "10.0.0.2:5060"]

[[sets]]
id = "2"
endpoints = ["10.0.0.3:5060"]
"#,
                output.display().to_string()
            ),
        )
        .unwrap();

        let (exporter, sets) = exporter_from_config(&config);
        exporter.export(&sets).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(
            parse_table(&content),
            vec![
                ("1".to_string(), "sip:10.0.0.1:5060".to_string()),
                ("1".to_string(), "sip:10.0.0.2:5060".to_string()),
                ("2".to_string(), "sip:10.0.0.3:5060".to_string()),
            ]
        );

        // each set's lines are preceded by its comment line
        let set1 = content.find("# Dispatcher set 1\n").unwrap();
        let set2 = content.find("# Dispatcher set 2\n").unwrap();
        assert!(set1 < content.find("1 sip:10.0.0.1:5060").unwrap());
        assert!(set2 < content.find("2 sip:10.0.0.3:5060").unwrap());
        assert!(content.find("1 sip:10.0.0.2:5060").unwrap() < set2);
    }

    /// Custom template loaded from a file next to a JSON config, atomic writes
    #[test]
    fn test_e2e_json_config_with_template_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dispatcher.csv");
        fs::write(
            dir.path().join("csv.j2"),
            "setid,destination\n{% for set in sets %}{% for ep in set.Endpoints %}{{ set.ID }},sip:{{ ep }}\n{% endfor %}{% endfor %}",
        )
        .unwrap();
        let config = dir.path().join("dispatchers.json");
        fs::write(
            &config,
            format!(
                r#"{{
                    "exporter": {{
                        "filename": {:?},
                        "template_path": "csv.j2",
                        "write_mode": "atomic"
                    }},
                    "sets": [
                        {{ "id": "10", "endpoints": ["a.example.com:5060", "b.example.com:5080"] }}
                    ]
                }}"#,
                output.display().to_string()
            ),
        )
        .unwrap();

        let (exporter, sets) = exporter_from_config(&config);
        assert_eq!(exporter.write_mode(), WriteMode::Atomic);
        exporter.export(&sets).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "setid,destination\n10,sip:a.example.com:5060\n10,sip:b.example.com:5080\n"
        );
    }

    /// Integer set ids in the config render as kamailio set ids
    #[test]
    fn test_e2e_integer_set_ids() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dispatcher.list");
        let config = dir.path().join("dispatchers.toml");
        fs::write(
            &config,
            format!(
                "[exporter]\nfilename = {:?}\n\n[[sets]]\nid = 1\nendpoints = [\"10.0.0.1:5060\"]\n",
                output.display().to_string()
            ),
        )
        .unwrap();

        let (exporter, sets) = exporter_from_config(&config);
        exporter.export(&sets).unwrap();

        assert_eq!(
            parse_table(&fs::read_to_string(&output).unwrap()),
            vec![("1".to_string(), "sip:10.0.0.1:5060".to_string())]
        );
    }

    /// Successive exports: last write wins, no residue, input order preserved
    #[test]
    fn test_e2e_successive_snapshots() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dispatcher.list");
        let exporter = FileExporter::new(&output, "").unwrap();

        let first: Vec<_> = (1..=5)
            .map(|i| DispatcherSet::new(i.to_string(), [format!("10.0.{i}.1:5060")]))
            .collect();
        exporter.export(&first).unwrap();
        assert_eq!(parse_table(&fs::read_to_string(&output).unwrap()).len(), 5);

        let second = vec![
            DispatcherSet::new("9", ["10.9.0.2:5060", "10.9.0.1:5060", "10.9.0.2:5060"]),
            DispatcherSet::new("3", ["10.3.0.1:5060"]),
        ];
        exporter.export(&second).unwrap();

        let rows = parse_table(&fs::read_to_string(&output).unwrap());
        let ids: Vec<_> = rows.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["9", "9", "9", "3"]);
        assert_eq!(rows[0].1, "sip:10.9.0.2:5060");
        assert_eq!(rows[2].1, "sip:10.9.0.2:5060");
    }

    /// Open failures do not poison the exporter
    #[test]
    fn test_e2e_open_failure_then_recovery() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("etc").join("dispatcher.list");
        let exporter = FileExporter::new(&output, "").unwrap();
        let sets = vec![DispatcherSet::new("1", ["10.0.0.1:5060"])];

        let err = exporter.export(&sets).unwrap_err();
        assert_eq!(err.kind(), ExportErrorKind::Open);

        fs::create_dir_all(output.parent().unwrap()).unwrap();
        exporter.export(&sets).unwrap();
        assert_eq!(parse_table(&fs::read_to_string(&output).unwrap()).len(), 1);
    }

    /// Exporter works through the trait object
    #[test]
    fn test_e2e_dyn_exporter() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dispatcher.list");
        let exporter: Box<dyn Exporter> = Box::new(FileExporter::new(&output, "").unwrap());

        exporter.export(&[]).unwrap();
        assert_eq!(exporter.name(), "file");
        assert!(parse_table(&fs::read_to_string(&output).unwrap()).is_empty());
    }
}
