//! Wire-level register bank
//!
//! Maps host reads and writes of raw addressed payloads onto the typed
//! command layer. The host framework owns transport and length checking;
//! semantics, reserved bits and read-only protection are enforced here.

use pulsegen_core::regs::{self, RegValue, Register};
use pulsegen_core::{ChannelMask, EventSink, PulseError, PulseIo, PulseResult, PwmTimer, TriggerMask};

use crate::PulseEngine;

impl<T, P, E> PulseEngine<T, P, E>
where
    T: PwmTimer,
    P: PulseIo,
    E: EventSink,
{
    /// Apply a host write to the register at `address`.
    ///
    /// A failed write leaves every register unchanged.
    pub fn write_register(&mut self, address: u8, value: RegValue) -> PulseResult<()> {
        let Some(register) = Register::from_address(address) else {
            return Err(PulseError::UnknownRegister);
        };
        match register {
            Register::Frequency(ch) => self.write_frequency(ch, value.as_f32()?),
            Register::DutyCycle(ch) => self.write_duty_cycle(ch, value.as_f32()?),
            Register::PulseCount(ch) => self.write_pulse_count(ch, value.as_u32()?),
            Register::Mode(ch) => {
                let mode = regs::decode_channel_mode(value.as_u8()?)?;
                self.write_channel_mode(ch, mode);
                Ok(())
            }
            Register::TriggerTargets(trig) => {
                let targets = ChannelMask::new(value.as_u8()?)?;
                self.write_trigger_targets(trig, targets);
                Ok(())
            }
            Register::TriggerMode(trig) => {
                let (action, invert) = regs::decode_trigger_mode(value.as_u8()?)?;
                self.write_trigger_mode(trig, action, invert);
                Ok(())
            }
            Register::AllTriggerMode => {
                let (action, invert) = regs::decode_all_mode(value.as_u8()?)?;
                self.write_all_mode(action, invert);
                Ok(())
            }
            Register::StartCommand => {
                let sources = TriggerMask::new(value.as_u8()?)?;
                self.write_start_command(sources);
                Ok(())
            }
            Register::StopCommand => {
                let sources = TriggerMask::new(value.as_u8()?)?;
                self.write_stop_command(sources);
                Ok(())
            }
            Register::Enable => {
                let mask = ChannelMask::new(value.as_u8()?)?;
                self.write_enable(mask);
                Ok(())
            }
            Register::ConfirmEnable => {
                let mask = ChannelMask::new(value.as_u8()?)?;
                self.write_confirm_enable(mask);
                Ok(())
            }
            Register::SingleShotDisable => {
                let mask = ChannelMask::new(value.as_u8()?)?;
                self.write_single_shot(mask);
                Ok(())
            }
            Register::EventEnable => {
                let enabled = regs::decode_event_enable(value.as_u8()?)?;
                self.write_event_enable(enabled);
                Ok(())
            }
            Register::Reserved => {
                value.as_u8()?;
                Ok(())
            }
            Register::RealFrequency(_)
            | Register::RealDutyCycle(_)
            | Register::TriggerInputState
            | Register::ChannelOutputState
            | Register::ExecutionState => Err(PulseError::ReadOnlyRegister),
        }
    }

    /// Serve a host read of the register at `address`.
    ///
    /// The start/stop command latches clear themselves when read.
    pub fn read_register(&mut self, address: u8) -> PulseResult<RegValue> {
        let Some(register) = Register::from_address(address) else {
            return Err(PulseError::UnknownRegister);
        };
        let value = match register {
            Register::Frequency(ch) => RegValue::F32(self.channel(ch).config().frequency_hz),
            Register::DutyCycle(ch) => RegValue::F32(self.channel(ch).config().duty_cycle_pct),
            Register::PulseCount(ch) => RegValue::U32(self.channel(ch).config().pulse_count),
            Register::RealFrequency(ch) => RegValue::F32(self.channel(ch).real_frequency_hz()),
            Register::RealDutyCycle(ch) => RegValue::F32(self.channel(ch).real_duty_cycle_pct()),
            Register::Mode(ch) => {
                RegValue::U8(regs::encode_channel_mode(self.channel(ch).config().mode))
            }
            Register::TriggerTargets(trig) => RegValue::U8(self.trigger(trig).targets.raw()),
            Register::TriggerMode(trig) => {
                let slot = self.trigger(trig);
                RegValue::U8(regs::encode_trigger_mode(slot.action, slot.invert))
            }
            Register::AllTriggerMode => {
                let slot = self.all_trigger();
                RegValue::U8(regs::encode_all_mode(slot.action, slot.invert))
            }
            Register::StartCommand => RegValue::U8(self.take_start_command().raw()),
            Register::StopCommand => RegValue::U8(self.take_stop_command().raw()),
            Register::Enable => RegValue::U8(self.enable_mask().raw()),
            Register::ConfirmEnable => RegValue::U8(self.confirm_enable_mask().raw()),
            Register::SingleShotDisable => RegValue::U8(self.single_shot_mask().raw()),
            Register::EventEnable => RegValue::U8(regs::encode_event_enable(self.event_enable())),
            Register::TriggerInputState => RegValue::U8(self.trigger_input_state()),
            Register::ChannelOutputState => RegValue::U8(self.channel_output_state()),
            Register::ExecutionState => RegValue::U8(self.exec_state().raw()),
            Register::Reserved => RegValue::U8(0),
        };
        Ok(value)
    }
}
