use serde_json::Value;
use std::{fs::File, io::Read, path::PathBuf};

pub fn load_all_test_files() -> [Value; 2] {
    let msg1 = load_test_file("ascent_309057.json");
    let msg2 = load_test_file("dropsonde_309053.json");

    [msg1, msg2]
}

fn load_test_file(fname: &str) -> Value {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);

    let mut f = File::open(&test_path).expect(&format!("Error opening file: {:#?}", test_path));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", test_path));

    serde_json::from_str(&contents).expect(&format!("Error parsing file: {:#?}", test_path))
}
