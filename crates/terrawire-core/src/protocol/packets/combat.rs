//! Damage, death and floating combat text.

use crate::types::{BitsByte, Color, DeathReason, NetworkText, Vector2};

fixed_body! {
    ProjectileDestroy = packet 29 {
        projectile: i16,
        owner: u8,
    }
}

fixed_body! {
    /// Floating number at a world position.
    CombatTextInt = packet 81 {
        position: Vector2,
        color: Color,
        amount: i32,
    }
}

fixed_body! {
    /// Colored chat line drawn above the chat box.
    SmartTextMessage = packet 107 {
        color: Color,
        text: NetworkText,
        width_limit: i16,
    }
}

fixed_body! {
    /// Damage dealt to a player. Flag bit 0 marks a crit, bit 1 PvP.
    PlayerHurt = packet 117 {
        player: u8,
        reason: DeathReason,
        damage: i16,
        hit_direction: u8,
        flags: BitsByte,
        cooldown: i8,
    }
}

fixed_body! {
    PlayerDeath = packet 118 {
        player: u8,
        reason: DeathReason,
        damage: i16,
        hit_direction: u8,
        flags: BitsByte,
    }
}

fixed_body! {
    CombatTextString = packet 119 {
        position: Vector2,
        color: Color,
        text: NetworkText,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::{Body, Context};
    use crate::wire::{Reader, Writer};

    #[test]
    fn player_hurt_embeds_death_reason() {
        let hurt = PlayerHurt {
            player: 2,
            reason: DeathReason::by_player(4),
            damage: 55,
            hit_direction: 1,
            flags: BitsByte::new(0b11),
            cooldown: -1,
        };
        let mut w = Writer::new();
        hurt.encode(&mut w, Context::Server).unwrap();
        assert_eq!(
            w.as_slice(),
            &[2, 0b0000_0001, 4, 0, 55, 0, 1, 0b11, 0xff]
        );

        let back = PlayerHurt::decode(&mut Reader::new(w.as_slice()), Context::Client).unwrap();
        assert_eq!(back, hurt);
    }

    #[test]
    fn smart_text_message_layout() {
        let m = SmartTextMessage {
            color: Color::new(255, 0, 0),
            text: NetworkText::literal("hey"),
            width_limit: 460,
        };
        let mut w = Writer::new();
        m.encode(&mut w, Context::Server).unwrap();
        assert_eq!(
            w.as_slice(),
            &[255, 0, 0, 0, 3, b'h', b'e', b'y', 0xcc, 0x01]
        );
    }
}
