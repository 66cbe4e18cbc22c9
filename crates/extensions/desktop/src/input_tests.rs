use super::*;

#[test]
fn test_parse_key_letters_and_digits() {
    for c in ('a'..='z').chain('0'..='9') {
        assert_eq!(parse_key(&c.to_string()).unwrap(), Key::Unicode(c));
    }
}

#[test]
fn test_parse_key_is_case_insensitive() {
    assert_eq!(parse_key("Z").unwrap(), Key::Unicode('z'));
    assert_eq!(parse_key("CTRL").unwrap(), Key::Control);
    assert_eq!(parse_key("Tab").unwrap(), Key::Tab);
}

#[test]
fn test_parse_key_tab_switch_keys() {
    assert_eq!(parse_key("ctrl").unwrap(), Key::Control);
    assert_eq!(parse_key("shift").unwrap(), Key::Shift);
    assert_eq!(parse_key("tab").unwrap(), Key::Tab);
}

#[test]
fn test_parse_key_modifier_aliases() {
    for alias in ["meta", "cmd", "command", "win", "super"] {
        assert_eq!(parse_key(alias).unwrap(), Key::Meta, "{}", alias);
    }
    assert_eq!(parse_key("control").unwrap(), Key::Control);
    assert_eq!(parse_key("option").unwrap(), Key::Alt);
}

#[test]
fn test_parse_key_special() {
    for name in [
        "enter", "return", "space", "backspace", "delete", "del", "escape", "esc", "home",
        "end", "pageup", "pagedown", "up", "down", "left", "right",
    ] {
        assert!(parse_key(name).is_ok(), "Failed for key: {}", name);
    }
}

#[test]
fn test_parse_key_function_keys() {
    for n in 1..=12 {
        assert!(parse_key(&format!("f{}", n)).is_ok(), "Failed for F{}", n);
    }
}

#[test]
fn test_parse_key_single_symbol() {
    assert_eq!(parse_key("/").unwrap(), Key::Unicode('/'));
    assert_eq!(parse_key("é").unwrap(), Key::Unicode('é'));
}

#[test]
fn test_parse_key_invalid() {
    assert!(matches!(parse_key("hyper"), Err(InputError::InvalidKey(_))));
    assert!(matches!(parse_key(""), Err(InputError::InvalidKey(_))));
    assert!(matches!(parse_key("f13"), Err(InputError::InvalidKey(_))));
}

#[test]
fn test_hotkey_rejects_invalid_key_before_input() {
    let mut driver = EnigoInputDriver::new(&ExecutorConfig::default());
    let result = driver.hotkey(&["ctrl", "hyper"]);
    assert!(matches!(result, Err(InputError::InvalidKey(_))));
}

#[test]
fn test_hotkey_empty_is_noop() {
    let mut driver = EnigoInputDriver::new(&ExecutorConfig::default());
    assert!(driver.hotkey(&[]).is_ok());
}

#[test]
fn test_driver_uses_configured_settle() {
    let config = ExecutorConfig {
        pointer_settle_ms: 75,
        ..Default::default()
    };
    let driver = EnigoInputDriver::new(&config);
    assert_eq!(driver.pointer_settle, Duration::from_millis(75));
}
