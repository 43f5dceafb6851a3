const LOGGER_CONFIGURATION_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    use log4rs;
    if let Err(e) = log4rs::init_file(LOGGER_CONFIGURATION_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOGGER_CONFIGURATION_FILE, e
        );
    }
}

pub fn log_header(header_name: &str, content: &[u8]) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    log::debug!(
        "{} ({} bytes)\n{:?}",
        header_name,
        content.len(),
        get_byte_array(content)
    );
}
