use std::ffi::OsString;

pub fn station_name() -> String {
    if let Ok(Ok(name)) = hostname::get().map(OsString::into_string) {
        if !name.is_empty() {
            return name;
        }
    }
    "ground-station".to_string()
}
