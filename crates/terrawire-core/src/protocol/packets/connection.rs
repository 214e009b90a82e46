//! Connection handshake and session bookkeeping.

use crate::types::{BitsByte, NetworkText};

fixed_body! {
    /// First message from a client: its protocol version string.
    ConnectRequest = packet 1 {
        version: String,
    }
}

fixed_body! {
    /// Server closes the connection with a reason.
    Disconnect = packet 2 {
        reason: NetworkText,
    }
}

fixed_body! {
    /// Server assigns the client its player slot.
    ContinueConnecting = packet 3 {
        player: u8,
        check_bytes_in_client_loop: bool,
    }
}

fixed_body! {
    RequestWorldInfo = packet 6 {}
}

fixed_body! {
    /// Client asks for the tiles around its spawn point.
    RequestEssentialTiles = packet 8 {
        x: i32,
        y: i32,
    }
}

fixed_body! {
    /// Progress text shown while the world loads.
    StatusText = packet 9 {
        status_max: i32,
        text: NetworkText,
        flags: BitsByte,
    }
}

fixed_body! {
    PasswordRequest = packet 37 {}
}

fixed_body! {
    PasswordSend = packet 38 {
        password: String,
    }
}

fixed_body! {
    /// Client finished loading and asks to be placed in the world.
    PlayerSpawnSelf = packet 49 {}
}

fixed_body! {
    ClientUuid = packet 68 {
        uuid: String,
    }
}

fixed_body! {
    FinishedConnecting = packet 129 {}
}

fixed_body! {
    ClientSyncedInventory = packet 138 {}
}

fixed_body! {
    SetCountsAsHost = packet 139 {
        player: u8,
        counts_as_host: bool,
    }
}
