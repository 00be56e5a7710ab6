#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let collection = &$e;
        if !collection.is_empty() {
            panic!("expected empty; actual={:?}", collection);
        }
    }};
}

#[macro_export]
macro_rules! assert_len {
    ($e:expr, $len:expr) => {{
        let collection = &$e;
        assert_eq!(
            $len,
            collection.len(),
            "unexpected length; actual={:?}",
            collection
        );
    }};
}
