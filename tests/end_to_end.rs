use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ini_nest::codec::{decode_section, flatten_section};
use ini_nest::{ConfigParser, Error, Map, SourceError, Value};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dummy_config.ini")
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn config_dict() -> Map {
    let my_config = map([
        (
            "profile",
            map([
                ("name", "Luna".into()),
                ("profession", "software engineer".into()),
                ("Hobby", "Marine fish".into()),
            ]),
        ),
        (
            "projects",
            Value::List(vec!["hello".into(), 1.into(), 3.into()]),
        ),
        ("Active", true.into()),
        ("Posts", Value::Null),
        ("Users", 5.into()),
    ]);

    let fish_profiles = map([
        ("Tank_type", "Reef Tank".into()),
        ("Tank_size", "50 gal".into()),
        ("Age", "1 year".into()),
        (
            "Fish",
            map([
                ("clownfish", 2.into()),
                ("chalk_goby", 1.into()),
                ("yellow_clown_goby", 1.into()),
            ]),
        ),
        (
            "invertebrates",
            map([("snails", 3.into()), ("Shrimps", 1.into())]),
        ),
        ("Others", map([("Liverock", 1.into())])),
        (
            "Corals",
            map([
                ("toadstool", 2.into()),
                ("ricordia", 1.into()),
                ("euphyllia", 2.into()),
            ]),
        ),
    ]);

    let date_format = map([
        (
            "formatter",
            map([
                ("fmt", "{asctime} - {name} - {levelname} - {message}".into()),
                ("datefmt", "%Y/%m/%d".into()),
                ("style", "{".into()),
            ]),
        ),
        ("Active", true.into()),
    ]);

    let Value::Map(root) = map([
        ("my_config", my_config),
        ("Fish_Profiles", fish_profiles),
        ("date_format", date_format),
    ]) else {
        unreachable!()
    };
    root
}

fn section_names(config: &ConfigParser) -> HashSet<&str> {
    config.sections().collect()
}

fn expected_names() -> HashSet<&'static str> {
    ["my_config", "Fish_Profiles", "date_format"].into()
}

#[test]
fn test_from_files_accepts_path_str_and_list() {
    let path = fixture();
    let as_str = path.to_str().unwrap().to_string();

    let configs = [
        ConfigParser::from_file(&path).unwrap(),
        ConfigParser::from_file(&as_str).unwrap(),
        ConfigParser::from_files(vec![path.clone()]).unwrap(),
    ];
    for config in &configs {
        assert_eq!(section_names(config), expected_names());
    }
}

#[test]
fn test_from_files_empty_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("foo.ini");
    std::fs::File::create(&file).unwrap();
    assert!(file.exists());

    let err = ConfigParser::from_file(&file).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(SourceError::NoSections(_))));
}

#[test]
fn test_from_files_nonexistent() {
    let err = ConfigParser::from_file("blah.ini").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let dir = TempDir::new().unwrap();
    let err = ConfigParser::from_file(dir.path().join("test.ini")).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_from_dict() {
    let config = ConfigParser::from_dict(&config_dict()).unwrap();
    assert_eq!(section_names(&config), expected_names());
    assert_eq!(config.all_to_dict(), config_dict());
}

#[test]
fn test_to_dict_scopes() {
    let config = ConfigParser::from_file(fixture()).unwrap();
    let dict = config_dict();

    assert_eq!(
        config.to_dict(Some("my_config"), None).unwrap(),
        dict["my_config"]
    );
    assert_eq!(
        config.to_dict(Some("my_config"), Some("profile")).unwrap(),
        dict["my_config"].as_map().unwrap()["profile"]
    );
    assert_eq!(config.to_dict(None, None).unwrap(), Value::Map(dict));
}

#[test]
fn test_to_dict_option_without_section() {
    let config = ConfigParser::from_file(fixture()).unwrap();
    let err = config.to_dict(None, Some("profile")).unwrap_err();
    assert!(matches!(err, Error::AmbiguousScope { .. }));
}

#[test]
fn test_to_dict_with_datefmt() {
    let config = ConfigParser::from_file(fixture()).unwrap();
    let expected = map([
        (
            "formatter",
            map([
                ("fmt", "{asctime} - {name} - {levelname} - {message}".into()),
                ("datefmt", "%Y/%m/%d".into()),
                ("style", "{".into()),
            ]),
        ),
        ("Active", true.into()),
    ]);
    assert_eq!(config.to_dict(Some("date_format"), None).unwrap(), expected);
}

#[test]
fn test_flatten_section_dict() {
    let dict = config_dict();
    let my_config = dict["my_config"].as_map().unwrap();

    let flat = flatten_section(my_config);
    let pairs: Vec<(&str, &str)> = flat.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(
        pairs,
        [
            ("profile", "\nname: Luna\nprofession: software engineer\nHobby: Marine fish"),
            ("projects", "['hello', 1, 3]"),
            ("Active", "True"),
            ("Posts", "None"),
            ("Users", "5"),
        ]
    );
    assert_eq!(&decode_section(&flat), my_config);
}

#[test]
fn test_written_file_reads_back() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("copy.ini");

    let config = ConfigParser::from_file(fixture()).unwrap();
    config.write_to(&out).unwrap();

    let copy = ConfigParser::from_file(&out).unwrap();
    assert_eq!(copy.all_to_dict(), config_dict());
}
