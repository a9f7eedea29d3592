use anyhow::{Context, Result};
use jack::{AudioIn, AudioOut, Client, ClientOptions, Control, Frames, Port, ProcessScope};
use log::{debug, info, warn};

use crate::io::ports::{AudioPorts, ControlSet};
use crate::pan::StereoPan;
use crate::settings::JackSettings;

const IN_LEFT: &str = "in_left";
const IN_RIGHT: &str = "in_right";
const OUT_LEFT: &str = "out_left";
const OUT_RIGHT: &str = "out_right";

/// JACK notifications handler
pub struct Notifications;

impl jack::NotificationHandler for Notifications {
    fn sample_rate(&mut self, _: &Client, sample_rate: Frames) -> Control {
        debug!(">> JACK sample_rate changed to {sample_rate}");
        Control::Continue
    }
}

/// Real-time side: owns the processor and the four JACK ports.
pub struct PanProcessHandler {
    pan: StereoPan,
    in_left: Port<AudioIn>,
    in_right: Port<AudioIn>,
    out_left: Port<AudioOut>,
    out_right: Port<AudioOut>,
}

impl PanProcessHandler {
    pub fn new(client: &Client, controls: &ControlSet) -> Result<Self> {
        let mut pan = StereoPan::new();
        pan.connect_controls(controls);
        pan.activate();

        Ok(Self {
            pan,
            in_left: client
                .register_port(IN_LEFT, AudioIn::default())
                .context("failed to register left in port")?,
            in_right: client
                .register_port(IN_RIGHT, AudioIn::default())
                .context("failed to register right in port")?,
            out_left: client
                .register_port(OUT_LEFT, AudioOut::default())
                .context("failed to register left out port")?,
            out_right: client
                .register_port(OUT_RIGHT, AudioOut::default())
                .context("failed to register right out port")?,
        })
    }
}

impl jack::ProcessHandler for PanProcessHandler {
    fn process(&mut self, _: &Client, ps: &ProcessScope) -> Control {
        let n_frames = ps.n_frames() as usize;
        let mut ports = AudioPorts::stereo(
            self.in_left.as_slice(ps),
            self.in_right.as_slice(ps),
            self.out_left.as_mut_slice(ps),
            self.out_right.as_mut_slice(ps),
        );
        self.pan.process(&mut ports, n_frames);
        Control::Continue
    }
}

/// Live JACK client running the processor on the audio thread.
///
/// Targets are changed through the shared [`ControlSet`]; the audio thread
/// picks them up at the start of the next cycle.
pub struct LiveClient {
    active_client: jack::AsyncClient<Notifications, PanProcessHandler>,
    controls: ControlSet,
    client_name: String,
}

impl LiveClient {
    pub fn new(settings: &JackSettings, controls: ControlSet) -> Result<Self> {
        let (client, status) = Client::new(&settings.client_name, ClientOptions::NO_START_SERVER)
            .context("failed to create JACK client")?;
        debug!("JACK client status: {status:?}");

        let client_name = client.name().to_string();
        info!(
            "JACK client '{client_name}': {} Hz, {} frames",
            client.sample_rate(),
            client.buffer_size()
        );

        let handler =
            PanProcessHandler::new(&client, &controls).context("error creating process handler")?;
        let active_client = client
            .activate_async(Notifications, handler)
            .context("failed to activate async client")?;

        let live = Self {
            active_client,
            controls,
            client_name,
        };

        if settings.auto_connect {
            live.connect_ports(settings);
        }

        Ok(live)
    }

    pub const fn controls(&self) -> &ControlSet {
        &self.controls
    }

    fn connect_ports(&self, settings: &JackSettings) {
        let client = self.active_client.as_client();
        let connections = [
            (settings.input_left_port.clone(), self.own_port(IN_LEFT)),
            (settings.input_right_port.clone(), self.own_port(IN_RIGHT)),
            (self.own_port(OUT_LEFT), settings.output_left_port.clone()),
            (self.own_port(OUT_RIGHT), settings.output_right_port.clone()),
        ];

        for (source, destination) in connections {
            if let Err(e) = client.connect_ports_by_name(&source, &destination) {
                warn!("Failed to connect '{source}' -> '{destination}': {e}");
            } else {
                info!("Connected {source} -> {destination}");
            }
        }
    }

    fn own_port(&self, short_name: &str) -> String {
        format!("{}:{short_name}", self.client_name)
    }
}

impl std::fmt::Debug for LiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveClient")
            .field("client_name", &self.client_name)
            .field("controls", &self.controls.values())
            .finish_non_exhaustive()
    }
}
