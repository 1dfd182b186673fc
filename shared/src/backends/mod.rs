cfg_if! {
    if #[cfg(all(target_arch = "wasm32", feature = "wbindgen"))] {
        mod wasm;
        pub use self::wasm::instant::Instant;
    }
    else {
        mod native;
        pub use self::native::instant::Instant;
    }
}
