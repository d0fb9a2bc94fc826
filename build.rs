fn main() {
    // Windows resource compilation for icon and manifest
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/vatdesk.ico");
        res.compile().unwrap();
    }
}
