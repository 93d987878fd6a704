pub mod common;

use automouse::automouse::AutoMouseProcessor;
use automouse::channel::EVENT_CHANNEL;
use automouse::config::{AutoMouseConfig, MacroKeysConfig};
use automouse::keycode::{KeyCode, MacroKey};
use automouse::processor::PollingProcessor;
use embassy_futures::select::select;
use rusty_fork::rusty_fork_test;

use crate::common::{key, motion, next_keyboard_report, next_mouse_report, test_block_on, wrap_layers};

rusty_fork_test! {
    #[test]
    fn ime_escape_emits_chord_and_keeps_pointer_mode() {
        let layers = wrap_layers();
        let mut processor = AutoMouseProcessor::new(
            layers,
            AutoMouseConfig::default(),
            MacroKeysConfig::default(),
        );

        test_block_on(async {
            let scenario = async {
                EVENT_CHANNEL.send(motion(2, 0)).await;
                let _ = next_mouse_report().await;
                assert!(layers.borrow().is_active(4));

                EVENT_CHANNEL
                    .send(key(KeyCode::Macro(MacroKey::ImeEscape), true))
                    .await;
                let report = next_keyboard_report().await;
                assert_eq!(report.modifier, 0);
                // LANG2 + Escape held together.
                assert_eq!(report.keycodes, [0x91, 0x29, 0, 0, 0, 0]);
                // Holding a macro key does not cancel the armed layer.
                assert!(layers.borrow().is_active(4));

                EVENT_CHANNEL
                    .send(key(KeyCode::Macro(MacroKey::ImeEscape), false))
                    .await;
                let report = next_keyboard_report().await;
                assert_eq!(report.keycodes, [0u8; 6]);
                assert!(layers.borrow().is_active(4));
            };
            select(processor.polling_loop(), scenario).await;
        });
    }

    #[test]
    fn launcher_macro_sends_alt_space() {
        let layers = wrap_layers();
        let mut processor = AutoMouseProcessor::new(
            layers,
            AutoMouseConfig::default(),
            MacroKeysConfig::default(),
        );

        test_block_on(async {
            let scenario = async {
                EVENT_CHANNEL
                    .send(key(KeyCode::Macro(MacroKey::Launcher), true))
                    .await;
                let report = next_keyboard_report().await;
                // Left Alt + Space + LANG2.
                assert_eq!(report.modifier, 1 << 2);
                assert_eq!(report.keycodes, [0x2C, 0x91, 0, 0, 0, 0]);

                EVENT_CHANNEL
                    .send(key(KeyCode::Macro(MacroKey::Launcher), false))
                    .await;
                let report = next_keyboard_report().await;
                assert_eq!(report.modifier, 0);
                assert_eq!(report.keycodes, [0u8; 6]);
            };
            select(processor.polling_loop(), scenario).await;
        });
    }
}
