//! Exposed channels which can be used to share data across devices,
//! processors and controllers.

use embassy_sync::channel::Channel;
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

use crate::event::{Event, LayerChangeEvent};
use crate::hid::Report;
use crate::{
    EVENT_CHANNEL_SIZE, LAYER_CHANNEL_PUBS, LAYER_CHANNEL_SIZE, LAYER_CHANNEL_SUBS, RawMutex,
    REPORT_CHANNEL_SIZE,
};

pub type LayerSub = Subscriber<
    'static,
    RawMutex,
    LayerChangeEvent,
    LAYER_CHANNEL_SIZE,
    LAYER_CHANNEL_SUBS,
    LAYER_CHANNEL_PUBS,
>;
pub type LayerPub = Publisher<
    'static,
    RawMutex,
    LayerChangeEvent,
    LAYER_CHANNEL_SIZE,
    LAYER_CHANNEL_SUBS,
    LAYER_CHANNEL_PUBS,
>;

/// Channel for input events from devices to the input processor
pub static EVENT_CHANNEL: Channel<RawMutex, Event, EVENT_CHANNEL_SIZE> = Channel::new();
/// Channel for HID reports from input processors to the hid writer
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();
/// Channel for layer change notifications
pub static LAYER_CHANNEL: PubSubChannel<
    RawMutex,
    LayerChangeEvent,
    LAYER_CHANNEL_SIZE,
    LAYER_CHANNEL_SUBS,
    LAYER_CHANNEL_PUBS,
> = PubSubChannel::new();

/// Send the specified `event` to `LAYER_CHANNEL`.
pub fn send_layer_event(event: LayerChangeEvent) {
    debug!("Sending LayerChangeEvent: {:?}", event);
    LAYER_CHANNEL.immediate_publisher().publish_immediate(event);
}
