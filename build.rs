fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/airq.ico");
        if let Err(e) = res.compile() {
            println!("cargo:warning=skipping Windows resources: {e}");
        }
    }
}
