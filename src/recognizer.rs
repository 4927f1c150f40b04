use crate::convert_err;
use crate::speech_api::*;
use crate::Session;
use crate::SmartHandle;
use crate::SpeechFactory;
use crate::SpxError;
use crate::SPXHANDLE_INVALID;

/// Recognizer created from a factory. Only its session parameters are
/// reachable from here.
#[derive(Debug)]
pub struct SpeechRecognizer {
    handle: SmartHandle<SPXRECOHANDLE>,
}

impl SpeechRecognizer {
    pub fn from_factory(factory: &SpeechFactory) -> Result<SpeechRecognizer, SpxError> {
        let mut handle = SPXHANDLE_INVALID;
        convert_err(speech_factory_create_speech_recognizer(factory.get_handle(), &mut handle))?;
        Ok(SpeechRecognizer {
            handle: SmartHandle::create("SpeechRecognizer", handle, SPXHANDLE_INVALID, recognizer_handle_close),
        })
    }

    pub fn session(&self) -> Result<Session, SpxError> {
        Session::from_recognizer(self)
    }

    pub fn is_valid(&self) -> bool {
        recognizer_handle_is_valid(self.handle.get())
    }

    #[inline]
    pub fn get_handle(&self) -> SPXRECOHANDLE {
        self.handle.get()
    }
}
