use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use libwifi::frame::components::{ManagementHeader, MacAddress, MANAGEMENT_HEADER_LEN};
use libwifi::frame::{BssTmRequest, NeighborReport, RequestMode, WnmAction, WnmBody};
use libwifi::parsers::{ElementCursor, ElementStep};
use libwifi::{Addresses, Frame, FCS_LEN};
use log::{debug, info};

use wnm_ap::channel::VhtChannelWidth;
use wnm_ap::wnm::disassoc_timeout_ms;
use wnm_ap::ApConfig;

#[derive(Parser, Debug)]
#[command(
    name = "wnmctl",
    author,
    version,
    about = "Inspect and craft 802.11 WNM action frames"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a management frame given as hex
    Decode(DecodeArgs),
    /// Build a BSS Transition Management Request frame
    BssTmReq(BssTmReqArgs),
    /// Build a neighbor report element for a single candidate
    NeighborReport(NeighborReportArgs),
    /// Convert a disassociation timer to the deauthentication delay
    Timer(TimerArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// The frame, starting at the frame control field
    hex: String,

    /// The frame ends with a 4 byte FCS, which is verified
    #[arg(long)]
    fcs: bool,
}

#[derive(Args, Debug)]
struct ChannelArgs {
    /// Operating frequency of the AP in MHz
    #[arg(long, default_value_t = 2437)]
    freq: u32,

    /// HT40 secondary channel offset (1, -1 or 0)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    secondary_channel: i8,

    /// VHT channel width (20or40, 80, 160, 80+80)
    #[arg(long, default_value_t = VhtChannelWidth::Use20Or40)]
    vht_width: VhtChannelWidth,
}

#[derive(Args, Debug)]
struct BssTmReqArgs {
    /// Destination station
    #[arg(long)]
    da: MacAddress,

    /// Our own address (source and BSSID)
    #[arg(long)]
    own: MacAddress,

    /// Raw request mode bits
    #[arg(long, default_value_t = 0)]
    mode: u8,

    /// Disassociation timer in beacon intervals
    #[arg(long, default_value_t = 0)]
    disassoc_timer: u16,

    #[arg(long, default_value_t = 0)]
    validity: u8,

    /// Session information URL, sets the ESS disassociation imminent bit
    #[arg(long)]
    url: Option<String>,

    /// BSSID of a preferred candidate
    #[arg(long, requires = "channel")]
    candidate: Option<MacAddress>,

    /// Channel of the candidate
    #[arg(long)]
    channel: Option<u8>,

    #[command(flatten)]
    ap: ChannelArgs,
}

#[derive(Args, Debug)]
struct NeighborReportArgs {
    #[arg(long)]
    bssid: MacAddress,

    #[arg(long)]
    channel: u8,

    #[arg(long, default_value_t = 255)]
    preference: u8,

    #[command(flatten)]
    ap: ChannelArgs,
}

#[derive(Args, Debug)]
struct TimerArgs {
    /// Disassociation timer in beacon intervals
    #[arg(long)]
    disassoc_timer: u16,

    /// Beacon interval in TU
    #[arg(long, default_value_t = 100)]
    beacon_int: u16,
}

impl ChannelArgs {
    fn config(&self, own_addr: MacAddress) -> ApConfig {
        ApConfig::default()
            .own_addr(own_addr)
            .freq(self.freq)
            .secondary_channel(self.secondary_channel)
            .vht_oper_chwidth(self.vht_width)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Decode(args) => decode(args),
        Commands::BssTmReq(args) => bss_tm_req(args),
        Commands::NeighborReport(args) => neighbor_report(args),
        Commands::Timer(args) => timer(args),
    }
}

fn decode(args: DecodeArgs) -> Result<()> {
    let cleaned: String = args
        .hex
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    let bytes = hex::decode(cleaned).context("Input is not valid hex")?;
    debug!("Decoding {} bytes", bytes.len());

    let frame = libwifi::parse_frame(&bytes, args.fcs)?;
    println!("{:#?}", frame);
    let unknown = "unknown".to_string();
    println!(
        "src: {} dest: {} bssid: {}",
        frame.src().map_or(unknown.clone(), |addr| addr.to_string()),
        frame.dest(),
        frame.bssid().map_or(unknown, |addr| addr.to_string())
    );

    if let Frame::Wnm(wnm) = &frame {
        let end = if args.fcs {
            bytes.len() - FCS_LEN
        } else {
            bytes.len()
        };
        let start = MANAGEMENT_HEADER_LEN + 2 + element_offset(&wnm.body);
        if start <= end {
            print_elements(&bytes[start..end], start);
        }
    }

    Ok(())
}

/// Size of the fixed fields in front of the information elements of a body.
fn element_offset(body: &WnmBody) -> usize {
    match body {
        WnmBody::SleepModeRequest(_) => 1,
        WnmBody::SleepModeResponse(response) => 3 + response.key_data_len(),
        WnmBody::BssTmQuery(query) => query.encoded_len() - query.candidate_list.len(),
        WnmBody::BssTmRequest(request) => request.encoded_len() - request.candidate_list.len(),
        WnmBody::BssTmResponse(response) => response.encoded_len() - response.candidate_list.len(),
    }
}

fn print_elements(span: &[u8], base: usize) {
    println!("Information elements:");
    for step in ElementCursor::new(span) {
        match step {
            ElementStep::Item(element) => println!(
                "  @{:<4} id {:<3} len {:<3} {}",
                base + element.offset,
                element.id,
                element.length,
                hex::encode(element.body)
            ),
            ElementStep::Truncated {
                offset,
                needed,
                available,
            } => println!(
                "  @{:<4} truncated: {needed} bytes needed, {available} available",
                base + offset
            ),
        }
    }
}

fn bss_tm_req(args: BssTmReqArgs) -> Result<()> {
    let config = args.ap.config(args.own);

    let mut request_mode = RequestMode(args.mode);
    if args.url.is_some() {
        request_mode = request_mode | RequestMode::ESS_DISASSOC_IMMINENT;
    }

    let mut candidate_list = Vec::new();
    if let Some(bssid) = args.candidate {
        let Some(channel) = args.channel else {
            bail!("--candidate needs --channel");
        };
        let report = NeighborReport::candidate(bssid, config.operating_class(), channel, 255);
        candidate_list = report.encode()?;
        request_mode = request_mode | RequestMode::PREFERRED_CANDIDATE_LIST;
    }

    let request = BssTmRequest {
        dialog_token: 1,
        request_mode,
        disassoc_timer: args.disassoc_timer,
        validity_interval: args.validity,
        bss_termination_duration: None,
        session_info_url: args.url,
        candidate_list,
    };
    let frame = WnmAction::new(
        ManagementHeader::action(args.da, config.own_addr),
        WnmBody::BssTmRequest(request),
    );
    let encoded = frame.encode()?;

    info!(
        "BSS Transition Management Request to {} ({} bytes, req_mode={:#x})",
        args.da,
        encoded.len(),
        request_mode.bits()
    );
    println!("{}", hex::encode(encoded));

    Ok(())
}

fn neighbor_report(args: NeighborReportArgs) -> Result<()> {
    let config = args.ap.config(MacAddress::zeroed());
    let Some(channel) = config.channel() else {
        bail!("{} MHz is not a known channel", config.freq);
    };
    info!(
        "AP on {channel}, operating class {}",
        config.operating_class()
    );

    let report = NeighborReport::candidate(
        args.bssid,
        config.operating_class(),
        args.channel,
        args.preference,
    );
    println!("{}", hex::encode(report.encode()?));

    Ok(())
}

fn timer(args: TimerArgs) -> Result<()> {
    let config = ApConfig::default().beacon_int(args.beacon_int);
    let timeout = disassoc_timeout_ms(args.disassoc_timer, config.beacon_interval());

    println!(
        "{} beacon intervals of {} TU: {} ms ({} s {} us)",
        args.disassoc_timer,
        config.beacon_interval(),
        timeout,
        timeout / 1000,
        (timeout % 1000) * 1000
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from([
            "wnmctl",
            "bss-tm-req",
            "--da",
            "02:00:00:00:00:01",
            "--own",
            "02:00:00:00:00:02",
            "--candidate",
            "aa:bb:cc:dd:ee:ff",
            "--channel",
            "6",
            "--vht-width",
            "80",
        ]);
        let Commands::BssTmReq(args) = cli.command else {
            panic!("Wrong subcommand");
        };
        assert_eq!(args.channel, Some(6));
        assert_eq!(args.ap.vht_width, VhtChannelWidth::Use80);
        assert_eq!(args.ap.freq, 2437);
    }

    #[test]
    fn test_element_offset() {
        let frame = WnmAction::new(
            ManagementHeader::action(MacAddress::broadcast(), MacAddress::zeroed()),
            WnmBody::BssTmRequest(BssTmRequest {
                dialog_token: 1,
                request_mode: RequestMode::ESS_DISASSOC_IMMINENT,
                session_info_url: Some("abc".to_string()),
                candidate_list: vec![52, 0],
                ..Default::default()
            }),
        );
        // Token, mode, timer, validity and the length prefixed url.
        assert_eq!(element_offset(&frame.body), 5 + 4);
    }
}
