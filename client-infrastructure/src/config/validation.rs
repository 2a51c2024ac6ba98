use anyhow::{anyhow, Result};

pub fn validate_base_url(value: &str) -> Result<()> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .ok_or_else(|| anyhow!("api_base_url must start with http:// or https://"))?;
    if rest.trim_matches('/').is_empty() {
        return Err(anyhow!("api_base_url has no host"));
    }
    Ok(())
}

pub fn validate_non_zero(name: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(anyhow!("{} must be greater than 0", name));
    }
    Ok(())
}
