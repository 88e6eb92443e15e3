//! Tests for the netfuse command.

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::io::Write;

    use nf_network::LayerSpec;

    use crate::{ConfigError, NetfuseConfig};

    #[test]
    fn empty_document_keeps_presets() {
        let c = NetfuseConfig::from_toml_str("").unwrap();
        assert_eq!(c, NetfuseConfig::default());
        assert_eq!(c.drive, LayerSpec::drive());
        assert_eq!(c.walk, LayerSpec::walk());
    }

    #[test]
    fn fields_override_individually() {
        let c = NetfuseConfig::from_toml_str(
            r#"
[drive]
default_speed_mps = 13.9

[walk]
speed_attributes = ["walking_speed"]
capacity = 500
"#,
        )
        .unwrap();
        assert_eq!(c.drive.default_speed_mps, 13.9);
        assert_eq!(c.drive.link_prefix, "car_");
        assert_eq!(c.walk.speed_attributes, ["walking_speed"]);
        assert_eq!(c.walk.capacity, 500.0);
        assert_eq!(c.walk.default_speed_mps, 1.4);
    }

    #[test]
    fn unknown_section_rejected() {
        let err = NetfuseConfig::from_toml_str("[bike]\ncapacity = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection(s) if s == "bike"));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = NetfuseConfig::from_toml_str("[drive]\nspeed = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)), "{err}");
    }

    #[test]
    fn section_must_be_a_table() {
        let err = NetfuseConfig::from_toml_str("drive = 3").unwrap_err();
        assert!(matches!(err, ConfigError::NotATable(s) if s == "drive"));
    }

    #[test]
    fn invalid_layer_values_rejected() {
        let err = NetfuseConfig::from_toml_str("[walk]\ndefault_speed_mps = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Layer { ref section, .. } if section == "walk"));
        assert!(err.to_string().starts_with("[walk]"), "{err}");
    }

    #[test]
    fn mode_parses_lowercase() {
        let c = NetfuseConfig::from_toml_str("[walk]\nmode = \"bike\"").unwrap();
        assert_eq!(c.walk.mode, nf_core::TransportMode::Bike);
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(b"[drive]\nnode_prefix = \"d_\"\n").unwrap();
        let c = NetfuseConfig::try_from(f.path()).unwrap();
        assert_eq!(c.drive.node_prefix, "d_");
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("netfuse.toml");
        let err = NetfuseConfig::try_from(path.as_path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("netfuse.toml"));
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod args {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::CliArgs;

    #[test]
    fn positionals_and_config() {
        let a = CliArgs::try_parse_from([
            "netfuse", "drive.graphml", "walk.graphml", "out/network.xml.gz", "--config", "c.toml",
        ])
        .unwrap();
        assert_eq!(a.drive, PathBuf::from("drive.graphml"));
        assert_eq!(a.walk, PathBuf::from("walk.graphml"));
        assert_eq!(a.output, PathBuf::from("out/network.xml.gz"));
        assert_eq!(a.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn all_three_paths_required() {
        assert!(CliArgs::try_parse_from(["netfuse", "drive.graphml", "walk.graphml"]).is_err());
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use std::io::Read;
    use std::path::{Path, PathBuf};

    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    use crate::{run, CliArgs};

    const DRIVE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="x" attr.type="string"/>
  <key id="d1" for="node" attr.name="y" attr.type="string"/>
  <graph edgedefault="directed">
    <node id="A"><data key="d0">127.000</data><data key="d1">37.500</data></node>
    <node id="B"><data key="d0">127.010</data><data key="d1">37.500</data></node>
    <edge source="A" target="B"/>
  </graph>
</graphml>
"#;

    const WALK: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="lon" attr.type="string"/>
  <key id="d1" for="node" attr.name="lat" attr.type="string"/>
  <key id="d2" for="edge" attr.name="oneway" attr.type="string"/>
  <key id="d3" for="edge" attr.name="walking_speed" attr.type="string"/>
  <graph edgedefault="undirected">
    <node id="A"><data key="d0">127.000</data><data key="d1">37.500</data></node>
    <node id="B"><data key="d0">127.010</data><data key="d1">37.500</data></node>
    <edge source="A" target="B"><data key="d2">False</data><data key="d3">1.0</data></edge>
  </graph>
</graphml>
"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(drive: &str, walk: &str) -> Self {
            let dir = tempfile::tempdir().expect("create temp dir");
            std::fs::write(dir.path().join("drive.graphml"), drive).unwrap();
            std::fs::write(dir.path().join("walk.graphml"), walk).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn args(&self, output: &str) -> CliArgs {
            CliArgs {
                drive:  self.path("drive.graphml"),
                walk:   self.path("walk.graphml"),
                output: self.path(output),
                config: None,
            }
        }
    }

    fn gunzip(path: &Path) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(std::fs::File::open(path).unwrap()).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn merges_both_graphs() {
        let fx = Fixture::new(DRIVE, WALK);
        let paths = run(&fx.args("network.xml.gz")).unwrap();
        assert_eq!(paths.xml, fx.path("network.xml"));

        let xml = std::fs::read_to_string(&paths.xml).unwrap();
        assert_eq!(gunzip(&paths.gz), xml.as_bytes());

        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <!DOCTYPE network SYSTEM \"http://www.matsim.org/files/dtd/network_v2.dtd\">\n"
        ));
        for id in ["v_A", "v_B", "p_A", "p_B"] {
            assert!(xml.contains(&format!("<node id=\"{id}\"")), "{id} missing:\n{xml}");
        }
        assert!(xml.contains(
            r#"<link id="car_0" from="v_A" to="v_B" length="882.169" freespeed="15.000" capacity="1000.0" permlanes="1" modes="car"/>"#
        ), "{xml}");
        assert!(xml.contains(
            r#"<link id="walk_0" from="p_A" to="p_B" length="882.169" freespeed="1.000" capacity="1000.0" permlanes="1" modes="walk"/>"#
        ), "{xml}");
        assert!(xml.contains(
            r#"<link id="walk_1" from="p_B" to="p_A" length="882.169" freespeed="1.000" capacity="1000.0" permlanes="1" modes="walk"/>"#
        ), "{xml}");
        assert!(!xml.contains("car_1"));
    }

    #[test]
    fn config_file_applies() {
        let fx = Fixture::new(DRIVE, WALK);
        std::fs::write(fx.path("netfuse.toml"), "[drive]\ndefault_speed_mps = 13.9\n").unwrap();
        let mut args = fx.args("network.xml");
        args.config = Some(fx.path("netfuse.toml"));

        let paths = run(&args).unwrap();
        assert_eq!(paths.gz, fx.path("network.xml.gz"));
        let xml = std::fs::read_to_string(&paths.xml).unwrap();
        assert!(xml.contains(r#"freespeed="13.900""#), "{xml}");
    }

    #[test]
    fn missing_coordinate_writes_nothing() {
        let bad_walk = WALK.replace(
            r#"<node id="B"><data key="d0">127.010</data><data key="d1">37.500</data></node>"#,
            r#"<node id="B"><data key="d1">37.500</data></node>"#,
        );
        let fx = Fixture::new(DRIVE, &bad_walk);
        let err = run(&fx.args("network.xml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("walk.graphml"), "{msg}");
        assert!(msg.contains("\"B\""), "{msg}");
        assert!(!fx.path("network.xml").exists());
        assert!(!fx.path("network.xml.gz").exists());
    }

    #[test]
    fn unreadable_input_reports_path() {
        let fx = Fixture::new(DRIVE, WALK);
        let mut args = fx.args("network.xml");
        args.drive = fx.path("absent.graphml");
        let msg = format!("{:#}", run(&args).unwrap_err());
        assert!(msg.contains("absent.graphml"), "{msg}");
        assert!(!fx.path("network.xml").exists());
    }

    #[test]
    fn corrupt_input_fails() {
        let fx = Fixture::new("<graphml><graph><node id=\"A\">", WALK);
        assert!(run(&fx.args("network.xml")).is_err());
    }
}
