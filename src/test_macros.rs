#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! lines_from_relative_file {
    ($f : expr) => {{
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join($f);
        let f = File::open(path).unwrap();
        BufReader::new(f).lines()
    }};
}
