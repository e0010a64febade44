use extinstall_lib::platform::{Platform, host_extension_suffixes};

pub fn cmd_info() {
  println!("System:");
  match Platform::current() {
    Some(platform) => println!("Platform: {}", platform),
    None => println!("Could not detect platform."),
  }
  println!("Extension suffixes: {}", host_extension_suffixes().join(" "));
}
